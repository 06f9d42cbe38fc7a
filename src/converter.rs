/*!
 * Conversion facade.
 *
 * This is the entry point used by the command line and by library callers:
 * pick a parser (explicit name or detection), parse, optionally shift,
 * then serialize with the requested format. It holds no parsing logic of
 * its own.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::detector;
use crate::document::SubtitleDocument;
use crate::errors::SubtitleError;
use crate::formats::{self, FormatId, SubtitleFormat};

/// Line terminator used for emitted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    fn apply(&self, text: String) -> String {
        match self {
            Self::Lf => text,
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }
}

/// Output options of a [`SubtitleConverter`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    #[serde(default)]
    pub line_ending: LineEnding,
}

/// Stateless converter between subtitle formats
#[derive(Debug, Clone, Default)]
pub struct SubtitleConverter {
    options: ConvertOptions,
}

impl SubtitleConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Identify the format of `content`
    pub fn detect(&self, content: &str) -> Result<FormatId, SubtitleError> {
        detector::detect(content)
    }

    /// Parse `content`, detecting its format unless `format` names one
    pub fn load(&self, content: &str, format: Option<&str>) -> Result<SubtitleDocument, SubtitleError> {
        let parser: &dyn SubtitleFormat = match format {
            Some(name) => formats::by_name(name)?,
            None => detector::detect_format(content).ok_or(SubtitleError::DetectionFailed)?,
        };
        let document = parser.parse(content)?;
        debug!("Loaded {} cues as {}", document.len(), parser.id());
        Ok(document)
    }

    /// Serialize `document` as the format named `format`
    pub fn emit(&self, document: &SubtitleDocument, format: &str) -> Result<String, SubtitleError> {
        let serializer = formats::by_name(format)?;
        Ok(self.options.line_ending.apply(serializer.serialize(document)))
    }

    /// Load, shift when `shift_seconds` is given, and emit
    pub fn convert(
        &self,
        content: &str,
        from: Option<&str>,
        to: &str,
        shift_seconds: Option<f64>,
    ) -> Result<String, SubtitleError> {
        // Resolve the target first so a bad name fails before any parsing
        formats::by_name(to)?;

        let mut document = self.load(content, from)?;
        if let Some(delta) = shift_seconds {
            document.shift_time(delta);
        }
        self.emit(&document, to)
    }
}

/// Identify the format of `content`
pub fn detect(content: &str) -> Result<FormatId, SubtitleError> {
    detector::detect(content)
}

/// Parse `content` with default options
pub fn load(content: &str, format: Option<&str>) -> Result<SubtitleDocument, SubtitleError> {
    SubtitleConverter::new().load(content, format)
}

/// Serialize `document` with default options
pub fn emit(document: &SubtitleDocument, format: &str) -> Result<String, SubtitleError> {
    SubtitleConverter::new().emit(document, format)
}

/// Convert `content` to the format named `to` with default options
pub fn convert(
    content: &str,
    from: Option<&str>,
    to: &str,
    shift_seconds: Option<f64>,
) -> Result<String, SubtitleError> {
    SubtitleConverter::new().convert(content, from, to, shift_seconds)
}

/*!
 * Subtitle formats.
 *
 * Each supported format is a unit struct implementing [`SubtitleFormat`].
 * [`FORMATS`] lists them in detection priority order; there is no runtime
 * registration.
 *
 * # Architecture
 *
 * - `blocks`: cue-block reader shared by the line-oriented parsers
 * - `markup`: inline tag and entity handling
 * - `srt`: SubRip
 * - `vtt`: WebVTT
 * - `sbv`: YouTube SubViewer
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::SubtitleDocument;
use crate::errors::SubtitleError;

pub mod blocks;
pub mod markup;
pub mod sbv;
pub mod srt;
pub mod vtt;

pub use sbv::SbvFormat;
pub use srt::SrtFormat;
pub use vtt::VttFormat;

/// Identifier of a supported subtitle format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatId {
    #[default]
    Srt,
    Vtt,
    Sbv,
}

impl FormatId {
    /// Every supported format
    pub const ALL: [FormatId; 3] = [FormatId::Srt, FormatId::Vtt, FormatId::Sbv];

    /// Lowercase identifier, also used as file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Sbv => "sbv",
        }
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Srt => "SubRip",
            Self::Vtt => "WebVTT",
            Self::Sbv => "SubViewer",
        }
    }

    /// Format matching a file extension, case-insensitively
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.extension().eq_ignore_ascii_case(extension.trim_start_matches('.')))
    }

    /// Parser and serializer for this format
    pub fn handler(&self) -> &'static dyn SubtitleFormat {
        match self {
            Self::Srt => &SrtFormat,
            Self::Vtt => &VttFormat,
            Self::Sbv => &SbvFormat,
        }
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormatId {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "srt" | "subrip" => Ok(Self::Srt),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            "sbv" => Ok(Self::Sbv),
            _ => Err(SubtitleError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Parser, serializer and content sniffer of one subtitle format
pub trait SubtitleFormat: Sync {
    /// Identifier of the format
    fn id(&self) -> FormatId;

    /// Whether `content` carries this format's marker in its mandated position
    fn sniff(&self, content: &str) -> bool;

    /// Parse raw text into a document
    fn parse(&self, content: &str) -> Result<SubtitleDocument, SubtitleError>;

    /// Serialize a document into raw text using `\n` line breaks
    fn serialize(&self, document: &SubtitleDocument) -> String;
}

/// Supported formats in detection priority order
pub static FORMATS: [&dyn SubtitleFormat; 3] = [&VttFormat, &SrtFormat, &SbvFormat];

/// Look up a format by user-facing name
pub fn by_name(name: &str) -> Result<&'static dyn SubtitleFormat, SubtitleError> {
    name.parse::<FormatId>().map(|id| id.handler())
}

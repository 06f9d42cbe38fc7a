/*!
 * Error types for the subconvert application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::formats::FormatId;

/// Errors raised by the conversion engine.
///
/// Every variant is terminal for the operation that produced it: a document
/// either parses completely or not at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// A timestamp token could not be parsed
    #[error("Invalid timestamp {line:?}{}", describe_line(.line_number))]
    TimestampSyntax {
        /// Offending raw line or token
        line: String,
        /// 1-based line number in the source text, when known
        line_number: Option<usize>,
    },

    /// The content belongs to a format but holds no usable cue
    #[error("No subtitle cues found in {format} content")]
    EmptyDocument {
        /// Format the content was parsed as
        format: FormatId,
    },

    /// No parser or serializer is registered under this name
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    /// No registered format recognized the content
    #[error("Could not detect the subtitle format of the content")]
    DetectionFailed,
}

impl SubtitleError {
    /// Timestamp error for a bare token with no line context
    pub fn timestamp(token: &str) -> Self {
        Self::TimestampSyntax {
            line: token.to_string(),
            line_number: None,
        }
    }

    /// Attach a source line to a timestamp error
    pub fn at_line(self, line_number: usize, line: &str) -> Self {
        match self {
            Self::TimestampSyntax { .. } => Self::TimestampSyntax {
                line: line.to_string(),
                line_number: Some(line_number),
            },
            other => other,
        }
    }
}

fn describe_line(line_number: &Option<usize>) -> String {
    match line_number {
        Some(n) => format!(" on line {}", n),
        None => String::new(),
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<SubtitleError>() {
            Ok(subtitle_error) => Self::Subtitle(subtitle_error),
            Err(error) => Self::Unknown(error.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

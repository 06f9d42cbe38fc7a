use log::debug;

use crate::errors::SubtitleError;
use crate::formats::{FORMATS, FormatId, SubtitleFormat};

// @module: Content-based format detection

/// First format in priority order whose sniffer accepts `content`
pub fn detect_format(content: &str) -> Option<&'static dyn SubtitleFormat> {
    let found = FORMATS.iter().copied().find(|format| format.sniff(content));
    match found {
        Some(format) => debug!("Detected {} content", format.id().display_name()),
        None => debug!("No subtitle format matched the content"),
    }
    found
}

/// Identify the format of `content`
pub fn detect(content: &str) -> Result<FormatId, SubtitleError> {
    detect_format(content)
        .map(|format| format.id())
        .ok_or(SubtitleError::DetectionFailed)
}

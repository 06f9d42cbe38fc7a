/*!
 * Timestamp grammar shared by every subtitle format.
 *
 * Parsing accepts `H:MM:SS.fff`, `H:MM:SS,fff` and `MM:SS.fff`, with any
 * number of hour and fraction digits, and ignores whitespace inside the
 * token. Formatting always produces millisecond precision.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: Digit-group structure of a timestamp after whitespace removal
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{1,2}):(\d{1,2})(?:[.,](\d+))?$").unwrap()
});

// @const: A timestamp-shaped token followed by the arrow
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d[\d:.,\s]*-->").unwrap()
});

// @const: Characters a timestamp token may span, whitespace included
static TIMESTAMP_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\d:.,\s]*").unwrap()
});

/// Cue range separator used by SRT and WebVTT timing lines
pub const ARROW: &str = "-->";

/// Zero-padding convention of a target format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS.mmm`
    Vtt,
    /// `H:MM:SS.mmm`
    Sbv,
}

/// Parsed `<start> --> <end> [settings]` line
#[derive(Debug, Clone, PartialEq)]
pub struct TimingLine {
    pub start: f64,
    pub end: f64,
    /// Trailing tokens after the end timestamp, verbatim
    pub settings: Option<String>,
}

/// Parse a single timestamp token into seconds
pub fn parse(token: &str) -> Result<f64, SubtitleError> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = TIMESTAMP_REGEX
        .captures(&compact)
        .ok_or_else(|| SubtitleError::timestamp(token))?;

    let field = |idx: usize| -> Result<u64, SubtitleError> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().map_err(|_| SubtitleError::timestamp(token)),
            None => Ok(0),
        }
    };
    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(SubtitleError::timestamp(token));
    }

    let whole = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| SubtitleError::timestamp(token))?;
    let fraction = caps.get(4).map_or("0", |m| m.as_str());

    // Decimal conversion keeps "00:03.30" identical to the literal 3.3
    format!("{}.{}", whole, fraction)
        .parse::<f64>()
        .map_err(|_| SubtitleError::timestamp(token))
}

/// Parse an arrow-separated timing line, keeping trailing settings
pub fn parse_range(line: &str) -> Result<TimingLine, SubtitleError> {
    let (left, right) = line
        .split_once(ARROW)
        .ok_or_else(|| SubtitleError::timestamp(line))?;

    let start = parse(left)?;

    // The end token may contain whitespace; settings start at the first other character
    let token_len = TIMESTAMP_PREFIX_REGEX.find(right).map_or(0, |m| m.end());
    let (end_token, settings) = right.split_at(token_len);
    let end = parse(end_token)?;

    let settings = settings.trim();
    Ok(TimingLine {
        start,
        end,
        settings: (!settings.is_empty()).then(|| settings.to_string()),
    })
}

/// Whether `line` is a timing line: a timestamp-shaped token, then the arrow
pub fn is_timing_line(line: &str) -> bool {
    TIMING_LINE_REGEX.is_match(line)
}

/// Format seconds using the zero-padding rules of `style`
pub fn format(seconds: f64, style: TimestampStyle) -> String {
    let ms = to_millis(seconds);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    match style {
        TimestampStyle::Srt => format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis),
        TimestampStyle::Vtt => format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis),
        TimestampStyle::Sbv => format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, millis),
    }
}

/// Round seconds to whole milliseconds, clamping negatives to zero
pub fn to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Cue, SubtitleDocument};
use crate::errors::SubtitleError;
use crate::formats::blocks::{self, significant_lines};
use crate::formats::{FormatId, SubtitleFormat};
use crate::timestamp::{self, TimestampStyle, TimingLine};

// @module: YouTube SubViewer (.sbv)

// @const: Strict first-line signature used for detection
static SIGNATURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+:\d{2}:\d{2}\.\d{3},\d+:\d{2}:\d{2}\.\d{3}$").unwrap()
});

// @const: Loose timing line; the end token is validated by the timestamp grammar
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+:\d{1,2}:\d{1,2}(?:\.\d+)?)\s*,\s*(\S+)$").unwrap()
});

/// SubViewer: `H:MM:SS.mmm,H:MM:SS.mmm` timing lines, plain text, no identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct SbvFormat;

impl SubtitleFormat for SbvFormat {
    fn id(&self) -> FormatId {
        FormatId::Sbv
    }

    fn sniff(&self, content: &str) -> bool {
        significant_lines(content, 1)
            .first()
            .is_some_and(|first| SIGNATURE_REGEX.is_match(first))
    }

    fn parse(&self, content: &str) -> Result<SubtitleDocument, SubtitleError> {
        let content = blocks::normalize(content);
        let lines = blocks::numbered_lines(&content);
        let raw_cues = blocks::read_cue_blocks(&lines, |l| TIMING_REGEX.is_match(l), parse_timing)?;

        let document: SubtitleDocument = raw_cues
            .into_iter()
            .map(|raw| Cue::new(raw.timing.start, raw.timing.end, raw.lines))
            .collect();

        if document.is_empty() {
            return Err(SubtitleError::EmptyDocument { format: FormatId::Sbv });
        }
        Ok(document)
    }

    fn serialize(&self, document: &SubtitleDocument) -> String {
        document
            .cues()
            .iter()
            .map(|cue| {
                format!(
                    "{},{}\n{}\n",
                    timestamp::format(cue.start, TimestampStyle::Sbv),
                    timestamp::format(cue.end, TimestampStyle::Sbv),
                    cue.lines.join("\n")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_timing(line: &str) -> Result<TimingLine, SubtitleError> {
    let caps = TIMING_REGEX
        .captures(line)
        .ok_or_else(|| SubtitleError::timestamp(line))?;
    Ok(TimingLine {
        start: timestamp::parse(&caps[1])?,
        end: timestamp::parse(&caps[2])?,
        settings: None,
    })
}

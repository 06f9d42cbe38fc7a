use crate::document::{Cue, SubtitleDocument};
use crate::errors::SubtitleError;
use crate::formats::blocks::{self, significant_lines};
use crate::formats::markup;
use crate::formats::{FormatId, SubtitleFormat};
use crate::timestamp::{self, TimestampStyle};

// @module: SubRip (.srt)

/// SubRip: numbered blocks, `HH:MM:SS,mmm --> HH:MM:SS,mmm`, no speakers or settings
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtFormat;

impl SubtitleFormat for SrtFormat {
    fn id(&self) -> FormatId {
        FormatId::Srt
    }

    fn sniff(&self, content: &str) -> bool {
        match significant_lines(content, 2).as_slice() {
            [first, ..] if timestamp::is_timing_line(first) => true,
            [first, second] => first.chars().all(|c| c.is_ascii_digit()) && timestamp::is_timing_line(second),
            _ => false,
        }
    }

    fn parse(&self, content: &str) -> Result<SubtitleDocument, SubtitleError> {
        let content = blocks::normalize(content);
        let lines = blocks::numbered_lines(&content);
        let raw_cues = blocks::read_cue_blocks(&lines, timestamp::is_timing_line, timestamp::parse_range)?;

        let document: SubtitleDocument = raw_cues
            .into_iter()
            .map(|raw| {
                let text: Vec<String> = raw.lines.iter().map(|l| markup::strip_tags(l)).collect();
                Cue::new(raw.timing.start, raw.timing.end, text)
            })
            .collect();

        if document.is_empty() {
            return Err(SubtitleError::EmptyDocument { format: FormatId::Srt });
        }
        Ok(document)
    }

    fn serialize(&self, document: &SubtitleDocument) -> String {
        document
            .cues()
            .iter()
            .enumerate()
            .map(|(i, cue)| {
                format!(
                    "{}\n{} --> {}\n{}\n",
                    i + 1,
                    timestamp::format(cue.start, TimestampStyle::Srt),
                    timestamp::format(cue.end, TimestampStyle::Srt),
                    cue.lines.join("\n")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/*!
 * WebVTT (.vtt) support.
 *
 * The parser skips the `WEBVTT` header with its metadata lines and the
 * `NOTE`, `STYLE` and `REGION` blocks, keeps cue settings and voice spans as
 * cue metadata, and strips any other markup. The serializer writes them back.
 */

use crate::document::{Cue, CueContent, SubtitleDocument};
use crate::errors::SubtitleError;
use crate::formats::blocks::{self, NumberedLine, significant_lines};
use crate::formats::markup;
use crate::formats::{FormatId, SubtitleFormat};
use crate::timestamp::{self, TimestampStyle};

/// Mandatory file signature
pub const SIGNATURE: &str = "WEBVTT";

/// Block keywords whose content is never cue text
const NON_CUE_BLOCKS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

#[derive(Debug, Clone, Copy, Default)]
pub struct VttFormat;

impl SubtitleFormat for VttFormat {
    fn id(&self) -> FormatId {
        FormatId::Vtt
    }

    fn sniff(&self, content: &str) -> bool {
        significant_lines(content, 1)
            .first()
            .is_some_and(|first| is_signature(first))
    }

    fn parse(&self, content: &str) -> Result<SubtitleDocument, SubtitleError> {
        let content = blocks::normalize(content);
        let lines = blocks::numbered_lines(&content);
        let body = drop_non_cue_blocks(skip_header(&lines));
        let raw_cues = blocks::read_cue_blocks(&body, timestamp::is_timing_line, timestamp::parse_range)?;

        let document: SubtitleDocument = raw_cues
            .into_iter()
            .map(|raw| {
                let pairs: Vec<(Option<String>, String)> = raw
                    .lines
                    .iter()
                    .map(|line| {
                        let (speaker, text) = markup::split_speaker(line);
                        (
                            speaker.map(|s| markup::decode_entities(&s)),
                            markup::decode_entities(&markup::strip_tags(text)),
                        )
                    })
                    .collect();
                let cue = Cue::new(raw.timing.start, raw.timing.end, CueContent::Spoken(pairs));
                match raw.timing.settings {
                    Some(settings) => cue.with_vtt_settings(settings),
                    None => cue,
                }
            })
            .collect();

        if document.is_empty() {
            return Err(SubtitleError::EmptyDocument { format: FormatId::Vtt });
        }
        Ok(document)
    }

    fn serialize(&self, document: &SubtitleDocument) -> String {
        let blocks: Vec<String> = document.cues().iter().map(serialize_cue).collect();
        if blocks.is_empty() {
            return format!("{}\n", SIGNATURE);
        }
        format!("{}\n\n{}", SIGNATURE, blocks.join("\n"))
    }
}

fn serialize_cue(cue: &Cue) -> String {
    let mut block = format!(
        "{} --> {}",
        timestamp::format(cue.start, TimestampStyle::Vtt),
        timestamp::format(cue.end, TimestampStyle::Vtt)
    );
    if let Some(settings) = cue.vtt_settings() {
        block.push(' ');
        block.push_str(settings);
    }
    block.push('\n');

    for (i, line) in cue.lines.iter().enumerate() {
        match cue.speaker(i) {
            Some(speaker) => block.push_str(&format!(
                "<v {}>{}</v>",
                markup::escape_text(speaker),
                markup::escape_text(line)
            )),
            None => block.push_str(&markup::escape_text(line)),
        }
        block.push('\n');
    }
    block
}

fn is_signature(line: &str) -> bool {
    line.strip_prefix(SIGNATURE)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Drop the signature line and the header lines glued to it
fn skip_header<'a>(lines: &'a [NumberedLine<'a>]) -> &'a [NumberedLine<'a>] {
    let Some(first) = lines.iter().position(|(_, l)| !l.trim().is_empty()) else {
        return lines;
    };
    if !is_signature(lines[first].1.trim()) {
        return lines;
    }

    let header_end = lines[first + 1..]
        .iter()
        .position(|(_, l)| l.trim().is_empty() || timestamp::is_timing_line(l))
        .map_or(lines.len(), |offset| first + 1 + offset);
    &lines[header_end..]
}

/// Remove NOTE, STYLE and REGION blocks; each ends at the next blank line
fn drop_non_cue_blocks<'a>(lines: &[NumberedLine<'a>]) -> Vec<NumberedLine<'a>> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut in_block = false;
    let mut at_block_start = true;

    for &(line_number, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            in_block = false;
            at_block_start = true;
            kept.push((line_number, line));
            continue;
        }
        if at_block_start && starts_non_cue_block(trimmed) {
            in_block = true;
        }
        at_block_start = false;
        if !in_block {
            kept.push((line_number, line));
        }
    }
    kept
}

fn starts_non_cue_block(line: &str) -> bool {
    NON_CUE_BLOCKS.iter().any(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
    })
}

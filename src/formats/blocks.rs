use log::debug;

use crate::errors::SubtitleError;
use crate::timestamp::TimingLine;

// @module: Cue-block reader for line-oriented formats

/// Timing line plus the raw text lines that follow it
#[derive(Debug, Clone)]
pub struct RawCue {
    pub timing: TimingLine,
    pub lines: Vec<String>,
}

/// Source line with its 1-based line number
pub type NumberedLine<'a> = (usize, &'a str);

/// Drop a leading byte-order mark and normalize line endings to `\n`
pub fn normalize(content: &str) -> String {
    content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Number the lines of normalized content
pub fn numbered_lines(content: &str) -> Vec<NumberedLine<'_>> {
    content.lines().enumerate().map(|(i, line)| (i + 1, line)).collect()
}

/// First `count` non-blank lines of `content`, trimmed
pub fn significant_lines(content: &str, count: usize) -> Vec<&str> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(count)
        .collect()
}

/// Group lines into cues.
///
/// A timing line opens a cue. Blank lines never close one, so text separated
/// from its timing line by blank lines still belongs to it, and any run of
/// blank lines between cues collapses. A line directly followed by a timing
/// line is a cue identifier and is dropped. Text before the first timing line
/// is ignored. The first invalid timing line aborts the whole read.
pub fn read_cue_blocks<F, P>(
    lines: &[NumberedLine<'_>],
    is_timing: F,
    parse_timing: P,
) -> Result<Vec<RawCue>, SubtitleError>
where
    F: Fn(&str) -> bool,
    P: Fn(&str) -> Result<TimingLine, SubtitleError>,
{
    let mut cues = Vec::new();
    let mut current: Option<RawCue> = None;

    for (pos, &(line_number, line)) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_timing(trimmed) {
            let timing = parse_timing(trimmed).map_err(|e| e.at_line(line_number, line))?;
            if let Some(done) = current.replace(RawCue { timing, lines: Vec::new() }) {
                cues.push(done);
            }
            continue;
        }

        let precedes_timing = lines
            .get(pos + 1)
            .is_some_and(|&(_, next)| is_timing(next.trim()));
        if precedes_timing {
            debug!("Skipping cue identifier on line {}: {}", line_number, trimmed);
            continue;
        }

        match current.as_mut() {
            Some(cue) => cue.lines.push(trimmed.to_string()),
            None => debug!("Ignoring text before the first cue on line {}: {}", line_number, trimmed),
        }
    }

    if let Some(done) = current {
        cues.push(done);
    }

    Ok(cues)
}

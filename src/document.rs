use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::shifter;

// @module: Internal subtitle representation shared by every format

/// WebVTT-only cue metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VttCueData {
    /// One entry per line of the cue, `None` where the line has no speaker
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speakers: Vec<Option<String>>,

    /// Raw cue settings such as `position:50% align:middle`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
}

impl VttCueData {
    fn is_empty(&self) -> bool {
        self.speakers.is_empty() && self.settings.is_none()
    }
}

/// Per-cue metadata, one namespace per format that defines any
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtt: Option<VttCueData>,
}

impl CueExtensions {
    pub fn is_empty(&self) -> bool {
        self.vtt.is_none()
    }
}

/// Text of a cue as handed to [`SubtitleDocument::add`]
#[derive(Debug, Clone, PartialEq)]
pub enum CueContent {
    /// Plain ordered lines
    Lines(Vec<String>),
    /// Ordered lines, each with an optional speaker
    Spoken(Vec<(Option<String>, String)>),
}

impl From<&str> for CueContent {
    fn from(text: &str) -> Self {
        CueContent::Lines(text.split('\n').map(str::to_string).collect())
    }
}

impl From<String> for CueContent {
    fn from(text: String) -> Self {
        CueContent::from(text.as_str())
    }
}

impl From<Vec<String>> for CueContent {
    fn from(lines: Vec<String>) -> Self {
        CueContent::Lines(lines)
    }
}

impl From<Vec<&str>> for CueContent {
    fn from(lines: Vec<&str>) -> Self {
        CueContent::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CueContent {
    fn from(lines: [&str; N]) -> Self {
        CueContent::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

impl From<Vec<(Option<String>, String)>> for CueContent {
    fn from(pairs: Vec<(Option<String>, String)>) -> Self {
        CueContent::Spoken(pairs)
    }
}

impl<const N: usize> From<[(Option<&str>, &str); N]> for CueContent {
    fn from(pairs: [(Option<&str>, &str); N]) -> Self {
        CueContent::Spoken(
            pairs
                .iter()
                .map(|(speaker, line)| (speaker.map(str::to_string), line.to_string()))
                .collect(),
        )
    }
}

/// Single caption entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds, never before `start`
    pub end: f64,

    /// Displayed text, one entry per line
    pub lines: Vec<String>,

    #[serde(default, skip_serializing_if = "CueExtensions::is_empty")]
    pub extensions: CueExtensions,
}

impl Cue {
    /// Build a cue, normalizing its time range.
    ///
    /// A negative start is clamped to zero and an end before the start is
    /// raised to the start. Line breaks inside a line split it, and
    /// whitespace around each line is dropped. Speakers are recorded only
    /// when at least one line has one.
    pub fn new(start: f64, end: f64, content: impl Into<CueContent>) -> Self {
        let (start, end) = normalize_range(start, end);

        let pairs: Vec<(Option<String>, String)> = match content.into() {
            CueContent::Lines(lines) => lines.into_iter().map(|line| (None, line)).collect(),
            CueContent::Spoken(pairs) => pairs,
        };

        let mut lines = Vec::with_capacity(pairs.len());
        let mut speakers = Vec::with_capacity(pairs.len());
        for (speaker, text) in pairs {
            for line in text.split('\n') {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                lines.push(line.to_string());
                speakers.push(speaker.clone().filter(|s| !s.trim().is_empty()));
            }
        }

        let mut extensions = CueExtensions::default();
        if speakers.iter().any(Option::is_some) {
            extensions.vtt = Some(VttCueData {
                speakers,
                settings: None,
            });
        }

        Cue {
            start,
            end,
            lines,
            extensions,
        }
    }

    /// Attach a WebVTT cue settings string
    pub fn with_vtt_settings(mut self, settings: impl Into<String>) -> Self {
        let settings = settings.into();
        let settings = settings.trim();
        if settings.is_empty() {
            return self;
        }
        self.extensions
            .vtt
            .get_or_insert_with(VttCueData::default)
            .settings = Some(settings.to_string());
        self
    }

    /// Speaker of the line at `index`, if any
    pub fn speaker(&self, index: usize) -> Option<&str> {
        self.extensions
            .vtt
            .as_ref()
            .and_then(|vtt| vtt.speakers.get(index))
            .and_then(|speaker| speaker.as_deref())
    }

    /// WebVTT cue settings, if any
    pub fn vtt_settings(&self) -> Option<&str> {
        self.extensions.vtt.as_ref().and_then(|vtt| vtt.settings.as_deref())
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Text of the cue with lines joined by `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

fn normalize_range(start: f64, end: f64) -> (f64, f64) {
    let start = if start.is_finite() { start.max(0.0) } else { 0.0 };
    let end = if end.is_finite() { end.max(start) } else { start };
    (start, end)
}

/// Ordered sequence of cues, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtitleDocument {
    cues: Vec<Cue>,
}

impl SubtitleDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cue built from `content`; content without any text is skipped
    pub fn add(&mut self, start: f64, end: f64, content: impl Into<CueContent>) -> &mut Self {
        self.push(Cue::new(start, end, content))
    }

    /// Append an already built cue; cues without lines are skipped
    pub fn push(&mut self, cue: Cue) -> &mut Self {
        if cue.lines.is_empty() {
            debug!("Skipping cue at {:.3}s without text", cue.start);
            return self;
        }
        self.cues.push(cue);
        self
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut [Cue] {
        &mut self.cues
    }

    pub fn into_cues(self) -> Vec<Cue> {
        self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Shift every cue by `delta_seconds`, clamping at zero
    pub fn shift_time(&mut self, delta_seconds: f64) -> &mut Self {
        shifter::shift_all(self, delta_seconds);
        self
    }

    /// Pretty JSON dump of the internal representation
    pub fn to_internal_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.cues)
    }
}

impl FromIterator<Cue> for SubtitleDocument {
    fn from_iter<I: IntoIterator<Item = Cue>>(iter: I) -> Self {
        let mut document = SubtitleDocument::new();
        for cue in iter {
            document.push(cue);
        }
        document
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        if let (Some(first), Some(last)) = (self.cues.first(), self.cues.last()) {
            writeln!(f, "Span: {:.3}s - {:.3}s", first.start, last.end)?;
        }
        Ok(())
    }
}

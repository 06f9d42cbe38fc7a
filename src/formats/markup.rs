/*!
 * Inline markup handling for cue text.
 *
 * Speaker annotations (`<v Name>text</v>`) are split off into metadata,
 * every other tag is dropped, and WebVTT character references are decoded
 * on parse and escaped again on output.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Voice span at the start of a line, optional classes and closing tag
static SPEAKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<v(?:\.[^\s>]+)*[ \t]+([^>]+)>(.*?)(?:</v>)?$").unwrap()
});

/// HTML-like tags and WebVTT inline timestamps
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[A-Za-z][^<>]*>|<\d[\d:.]*>").unwrap()
});

/// SSA-style override blocks often found in SRT ({\an8}, {\i1})
static OVERRIDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\\[^}]*\}").unwrap()
});

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(amp|lt|gt|nbsp|lrm|rlm|quot|apos|#39);").unwrap()
});

/// Split a leading voice span into `(speaker, text)`
pub fn split_speaker(line: &str) -> (Option<String>, &str) {
    match SPEAKER_REGEX.captures(line) {
        Some(caps) => {
            let speaker = caps.get(1).map(|m| m.as_str().trim().to_string());
            let text = caps.get(2).map_or("", |m| m.as_str());
            (speaker.filter(|s| !s.is_empty()), text)
        }
        None => (None, line),
    }
}

/// Remove formatting tags, keeping their inner text
pub fn strip_tags(text: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(text, "");
    OVERRIDE_REGEX.replace_all(&without_tags, "").trim().to_string()
}

/// Decode the character references WebVTT allows in cue text
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            match &caps[1] {
                "amp" => "&",
                "lt" => "<",
                "gt" => ">",
                "nbsp" => "\u{a0}",
                "lrm" => "\u{200e}",
                "rlm" => "\u{200f}",
                "quot" => "\"",
                _ => "'",
            }
            .to_string()
        })
        .into_owned()
}

/// Escape text for WebVTT cue payloads
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/*!
 * Tests for the WebVTT parser and serializer
 */

use anyhow::Result;
use subconvert::formats::{FormatId, SubtitleFormat, VttFormat};
use subconvert::{Cue, SubtitleDocument, SubtitleError};

use crate::common;

fn parse(content: &str) -> Result<SubtitleDocument, SubtitleError> {
    VttFormat.parse(content)
}

fn expected(cues: &[(f64, f64, &[&str])]) -> SubtitleDocument {
    let mut doc = SubtitleDocument::new();
    for (start, end, lines) in cues {
        doc.add(*start, *end, lines.to_vec());
    }
    doc
}

#[test]
fn test_parse_withSpeakerFile_shouldRecordSpeaker() -> Result<()> {
    let doc = parse(&common::read_resource("vtt_with_name.vtt"))?;

    assert_eq!(doc.len(), 1);
    let cue = &doc.cues()[0];
    assert_eq!((cue.start, cue.end), (9.0, 11.0));
    assert_eq!(cue.lines, vec!["We are in New York City"]);
    assert_eq!(cue.speaker(0), Some("Roger Bingham"));

    Ok(())
}

#[test]
fn test_parse_withIdentifiersAndStrayText_shouldDropThem() -> Result<()> {
    let content = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:01.000\na\n\nsome text allowed in vtt that is not shown\n00:00:01.000 --> 00:00:02.000\nb\nb\n\nsomething\n00:00:02.000 --> 00:00:03.000\nc\n\n";

    let doc = parse(content)?;

    assert_eq!(doc, expected(&[(0.0, 1.0, &["a"]), (1.0, 2.0, &["b", "b"]), (2.0, 3.0, &["c"])]));
    Ok(())
}

#[test]
fn test_parse_withWrongTimestamp_shouldFail() {
    let err = parse("WEBVTT\n\n1\n00:00:00.00 --> 00:00:01.o0\na").unwrap_err();

    assert_eq!(
        err,
        SubtitleError::TimestampSyntax {
            line: "00:00:00.00 --> 00:00:01.o0".to_string(),
            line_number: Some(4),
        }
    );
}

/// A header-only file is an error rather than an empty document
#[test]
fn test_parse_withHeaderOnly_shouldFailWithEmptyDocument() {
    let err = parse("WEBVTT\n\n").unwrap_err();
    assert_eq!(err, SubtitleError::EmptyDocument { format: FormatId::Vtt });
}

#[test]
fn test_parse_withOversizedHourGroup_shouldFailCleanly() {
    let err = parse("WEBVTT\n\n1000000000000000000:00:00.000 --> 1000000000000000000:00:01.000\na\n").unwrap_err();

    assert!(matches!(err, SubtitleError::TimestampSyntax { line_number: Some(3), .. }));
}

#[test]
fn test_parse_withMissingText_shouldDropCaptionlessCue() -> Result<()> {
    let doc = parse(&common::read_resource("vtt_with_missing_text.vtt"))?;

    assert_eq!(doc, expected(&[(0.0, 1.0, &["one"]), (2.0, 3.0, &["three"])]));
    Ok(())
}

#[test]
fn test_parse_withManyBlankLinesBetweenBlocks_shouldMatchSingleBlankLine() -> Result<()> {
    let spaced = parse("WEBVTT\n\n00:00:00.000 --> 00:00:01.000\ntext1\n\n\n\n\n00:00:01.000 --> 00:00:02.000\ntext2")?;
    let compact = parse("WEBVTT\n\n00:00:00.000 --> 00:00:01.000\ntext1\n\n00:00:01.000 --> 00:00:02.000\ntext2")?;

    assert_eq!(spaced, compact);
    assert_eq!(spaced, expected(&[(0.0, 1.0, &["text1"]), (1.0, 2.0, &["text2"])]));
    Ok(())
}

#[test]
fn test_parse_withStyleAndSettings_shouldKeepSettings() -> Result<()> {
    let doc = parse(&common::read_resource("vtt_with_styles.vtt"))?;

    let mut want = SubtitleDocument::new();
    want.push(Cue::new(0.0, 10.0, "Hello world.").with_vtt_settings("position:50% line:15% align:middle"));
    assert_eq!(doc, want);
    Ok(())
}

#[test]
fn test_parse_withHtml_shouldStripTags() -> Result<()> {
    let doc = parse(&common::read_resource("vtt_with_html.vtt"))?;

    assert_eq!(doc, expected(&[(0.0, 10.0, &["Sur les playground, ici à Montpellier"])]));
    Ok(())
}

#[test]
fn test_parse_withoutHours_shouldParse() -> Result<()> {
    let doc = parse(&common::read_resource("vtt_without_hours_in_timestamp.vtt"))?;

    assert_eq!(doc, expected(&[(0.0, 10.0, &["I've spent nearly two decades"])]));
    Ok(())
}

#[test]
fn test_parse_withBlankLinesInsideBlock_shouldNotSplitIt() -> Result<()> {
    let doc = parse(&common::read_resource("vtt_with_multiple_new_lines.vtt"))?;

    assert_eq!(doc, expected(&[(0.0, 1.0, &["one", "two"]), (2.0, 3.0, &["three"])]));
    Ok(())
}

#[test]
fn test_parse_withTimestampMapHeader_shouldIgnoreIt() -> Result<()> {
    let doc = parse("WEBVTT\nX-TIMESTAMP-MAP=LOCAL:00:00:00.000,MPEGTS:0\n\n00:00:00.000 --> 00:00:01.000\ntext1")?;

    assert_eq!(doc, expected(&[(0.0, 1.0, &["text1"])]));
    Ok(())
}

#[test]
fn test_parse_withSpacesAroundArrow_shouldParse() -> Result<()> {
    let doc = parse("WEBVTT\n\n     00:00:00.100    -->    00:00:01.100     \ntext1")?;

    assert_eq!(doc, expected(&[(0.1, 1.1, &["text1"])]));
    Ok(())
}

#[test]
fn test_parse_withShortTimeFormats_shouldParse() -> Result<()> {
    assert_eq!(parse("WEBVTT\n\n00:00:01.10 --> 00:00:02.50\none")?, expected(&[(1.1, 2.5, &["one"])]));
    assert_eq!(parse("WEBVTT\n\n00:03.30 --> 00:04.40\ntwo")?, expected(&[(3.3, 4.4, &["two"])]));
    assert_eq!(parse("WEBVTT\n\n1:00:00.000 --> 1:00:01.000\nthree")?, expected(&[(3600.0, 3601.0, &["three"])]));
    Ok(())
}

#[test]
fn test_parse_withExtraNewLinesAroundText_shouldAttachTextToCue() -> Result<()> {
    let doc = parse("WEBVTT\n\n\n\n00:00:01.10 --> 00:00:02.50\n\none\n\n\n00:00:03.30 --> 00:00:04.40\n\ntwo")?;

    assert_eq!(doc, expected(&[(1.1, 2.5, &["one"]), (3.3, 4.4, &["two"])]));
    Ok(())
}

#[test]
fn test_parse_withCommaInTimestamp_shouldParse() -> Result<()> {
    let doc = parse("WEBVTT\n\n00:00:01,01 --> 00:00:02.02\na")?;

    assert_eq!(doc, expected(&[(1.01, 2.02, &["a"])]));
    Ok(())
}

#[test]
fn test_parse_withEntities_shouldDecodeThem() -> Result<()> {
    let doc = parse("WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nFish &amp; chips &lt;3\n")?;

    assert_eq!(doc.cues()[0].lines, vec!["Fish & chips <3"]);
    Ok(())
}

#[test]
fn test_serialize_withSettings_shouldAppendThem() {
    let mut doc = SubtitleDocument::new();
    doc.push(Cue::new(0.0, 1.0, "a").with_vtt_settings("position:50% line:15% align:middle"));

    assert_eq!(
        VttFormat.serialize(&doc),
        "WEBVTT\n\n00:00:00.000 --> 00:00:01.000 position:50% line:15% align:middle\na\n"
    );
}

#[test]
fn test_serialize_withSpeakers_shouldWriteVoiceSpans() {
    let mut doc = SubtitleDocument::new();
    doc.add(0.0, 1.0, [(Some("John"), "a"), (None, "b")]);

    assert_eq!(
        VttFormat.serialize(&doc),
        "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n<v John>a</v>\nb\n"
    );
}

#[test]
fn test_speakers_shouldRoundTrip() -> Result<()> {
    let mut doc = SubtitleDocument::new();
    doc.add(0.0, 1.0, [(Some("John"), "a"), (None, "b")]);

    let reparsed = parse("WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n<v John>a</v>\nb\n")?;
    assert_eq!(reparsed, doc);

    let reparsed = parse(&VttFormat.serialize(&doc))?;
    assert_eq!(reparsed, doc);
    Ok(())
}

#[test]
fn test_serialize_thenParse_withEscapedText_shouldRoundTrip() -> Result<()> {
    let mut doc = common::fixture_document();
    doc.add(3601.0, 3602.0, [(Some("A & B"), "x < y > z")]);
    doc.push(Cue::new(3603.0, 3604.0, "settings").with_vtt_settings("align:start"));

    let reparsed = parse(&VttFormat.serialize(&doc))?;

    assert_eq!(reparsed, doc);
    Ok(())
}

#[test]
fn test_serialize_thenParse_withIndentedLine_shouldRoundTrip() -> Result<()> {
    let mut doc = SubtitleDocument::new();
    doc.add(0.0, 1.0, ["  indented", "plain  "]);

    let reparsed = parse(&VttFormat.serialize(&doc))?;

    assert_eq!(reparsed, doc);
    assert_eq!(doc.cues()[0].lines, vec!["indented", "plain"]);
    Ok(())
}

#[test]
fn test_sniff_withProseMentioningMarker_shouldReject() {
    assert!(VttFormat.sniff(&common::read_resource("vtt.vtt")));
    assert!(VttFormat.sniff("\u{feff}WEBVTT - title\n\n"));
    assert!(!VttFormat.sniff("something \nabout WEBVTT"));
}

/*!
 * Time shifting for subtitle documents.
 *
 * All operations mutate the document in place. Start and end are clamped
 * at zero independently, so a cue pushed before zero loses duration
 * instead of keeping it.
 */

use log::debug;

use crate::document::{Cue, SubtitleDocument};

/// Shift every cue by `delta_seconds`
pub fn shift_all(document: &mut SubtitleDocument, delta_seconds: f64) -> &mut SubtitleDocument {
    for cue in document.cues_mut() {
        shift_cue(cue, delta_seconds);
    }
    debug!("Shifted {} cues by {:+.3}s", document.len(), delta_seconds);
    document
}

/// Shift only cues starting within `[from, till]`; `None` leaves the range open-ended
pub fn shift_range(
    document: &mut SubtitleDocument,
    delta_seconds: f64,
    from: f64,
    till: Option<f64>,
) -> &mut SubtitleDocument {
    let mut shifted = 0;
    for cue in document.cues_mut() {
        if in_range(cue.start, from, till) {
            shift_cue(cue, delta_seconds);
            shifted += 1;
        }
    }
    debug!("Shifted {} of {} cues by {:+.3}s", shifted, document.len(), delta_seconds);
    document
}

/// Linear drift correction between `from` and `till`.
///
/// A cue starting at `from` does not move, a cue starting at `till` moves by
/// `delta_seconds`, and cues in between move proportionally. Cues outside the
/// window are left alone. An empty or inverted window changes nothing.
pub fn shift_gradually(
    document: &mut SubtitleDocument,
    delta_seconds: f64,
    from: f64,
    till: f64,
) -> &mut SubtitleDocument {
    if till <= from {
        debug!("Ignoring gradual shift over empty window {:.3}s - {:.3}s", from, till);
        return document;
    }

    let span = till - from;
    for cue in document.cues_mut() {
        if in_range(cue.start, from, Some(till)) {
            let ratio = (cue.start - from) / span;
            shift_cue(cue, delta_seconds * ratio);
        }
    }
    document
}

fn in_range(start: f64, from: f64, till: Option<f64>) -> bool {
    start >= from && till.is_none_or(|till| start <= till)
}

fn shift_cue(cue: &mut Cue, delta_seconds: f64) {
    cue.start = (cue.start + delta_seconds).max(0.0);
    cue.end = (cue.end + delta_seconds).max(0.0);
}

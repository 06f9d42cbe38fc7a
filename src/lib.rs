/*!
 * # subconvert - subtitle format conversion
 *
 * A Rust library for converting text subtitle files between formats and
 * shifting their timings.
 *
 * ## Features
 *
 * - Parse and write SubRip (`.srt`), WebVTT (`.vtt`) and SubViewer (`.sbv`)
 * - Detect the format of raw content
 * - Tolerant timestamp grammar (`MM:SS.ff`, `H:MM:SS,fff`, stray whitespace)
 * - WebVTT speakers and cue settings preserved through the internal model
 * - Shift all cues, a time range, or correct linear drift
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: Timestamp grammar shared by every format
 * - `document`: Internal representation (cues and per-format metadata)
 * - `formats`: One parser/serializer per format:
 *   - `formats::srt`: SubRip
 *   - `formats::vtt`: WebVTT
 *   - `formats::sbv`: YouTube SubViewer
 * - `detector`: Content-based format detection
 * - `shifter`: Time shifting
 * - `converter`: Conversion facade used by callers
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: File and folder conversion for the command line
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod converter;
pub mod detector;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod formats;
pub mod shifter;
pub mod timestamp;

// Re-export main types for easier usage
pub use app_config::Config;
pub use converter::{ConvertOptions, LineEnding, SubtitleConverter, convert, detect, emit, load};
pub use document::{Cue, CueContent, CueExtensions, SubtitleDocument, VttCueData};
pub use errors::{AppError, SubtitleError};
pub use formats::{FormatId, SubtitleFormat};
pub use shifter::{shift_all, shift_gradually, shift_range};

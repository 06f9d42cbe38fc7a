/*!
 * Common test utilities for the subconvert test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use subconvert::SubtitleDocument;

/// Enables log output for a test run when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample SRT file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Reads a test resource as a string
pub fn read_resource(relative_path: &str) -> String {
    fs::read_to_string(test_resource_path(relative_path))
        .unwrap_or_else(|e| panic!("missing test resource {}: {}", relative_path, e))
}

/// Document matching the srt.srt, vtt.vtt and sbv.sbv fixtures
pub fn fixture_document() -> SubtitleDocument {
    let mut document = SubtitleDocument::new();
    document
        .add(1.0, 4.5, "Hello there.")
        .add(5.0, 8.25, ["This is the second cue", "on two lines."])
        .add(62.003, 3600.0, "Tom & Jerry");
    document
}

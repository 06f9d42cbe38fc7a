use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::formats::FormatId;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a converted subtitle
    // @params: input_file, output_dir, format
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        format: FormatId,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(format.extension());

        output_dir.as_ref().join(output_filename)
    }

    /// Subtitle format implied by a file extension
    pub fn format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatId> {
        path.as_ref()
            .extension()
            .and_then(|ext| FormatId::from_extension(&ext.to_string_lossy()))
    }

    /// Find every file with a supported subtitle extension under `dir`
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::format_from_extension(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a UTF-8 subtitle file, dropping a leading byte-order mark
    pub fn read_subtitle_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("Input file does not exist: {:?}", path));
        }

        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        let content = String::from_utf8(bytes)
            .with_context(|| format!("File is not valid UTF-8: {:?}", path))?;

        Ok(content.trim_start_matches('\u{feff}').to_string())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

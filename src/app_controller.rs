use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::converter::SubtitleConverter;
use crate::document::SubtitleDocument;
use crate::file_utils::FileManager;
use crate::formats::FormatId;

// @module: Application controller for subtitle conversion

/// Outcome of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Conversion facade configured from `config`
    converter: SubtitleConverter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let converter = SubtitleConverter::with_options(config.convert_options());

        Ok(Self { config, converter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert one file.
    ///
    /// Returns the written path, or `None` when the output already exists and
    /// overwriting is disabled.
    pub fn run(&self, input_file: &Path, output_file: Option<&Path>) -> Result<Option<PathBuf>> {
        let output_format = self.config.output_format;
        let output_path = match output_file {
            Some(path) => path.to_path_buf(),
            None => FileManager::generate_output_path(
                input_file,
                input_file.parent().unwrap_or(Path::new(".")),
                output_format,
            ),
        };

        if Self::same_file(input_file, &output_path) {
            return Err(anyhow!(
                "Refusing to overwrite the input file {:?}; choose another output path or format",
                input_file
            ));
        }

        if output_path.exists() && !self.config.force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let mut document = self.load_file(input_file)?;
        if self.config.shift_seconds != 0.0 {
            document.shift_time(self.config.shift_seconds);
            debug!("Applied a shift of {:+.3}s", self.config.shift_seconds);
        }

        let content = self
            .converter
            .emit(&document, output_format.as_str())
            .context("Failed to serialize subtitles")?;
        FileManager::write_to_file(&output_path, &content)?;

        info!("Saved {} cues to {:?}", document.len(), output_path);
        Ok(Some(output_path))
    }

    /// Convert every subtitle file found under `input_dir`
    pub fn run_folder(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_subtitle_files(input_dir)?;
        let mut summary = FolderSummary::default();
        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(summary);
        }

        info!("Converting {} subtitle file(s) to {}", files.len(), self.config.output_format);

        let progress_bar = ProgressBar::new(files.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for file in &files {
            // Files already in the target format would be converted onto themselves
            if FileManager::format_from_extension(file) == Some(self.config.output_format) && output_dir.is_none() {
                debug!("Skipping {:?}, already in the target format", file);
                summary.skipped += 1;
                progress_bar.inc(1);
                continue;
            }

            progress_bar.set_message(file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());

            let output_path = output_dir.map(|dir| {
                FileManager::generate_output_path(file, dir, self.config.output_format)
            });
            match self.run(file, output_path.as_deref()) {
                Ok(Some(_)) => summary.converted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Finished: {} converted, {} skipped, {} failed",
            summary.converted, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Identify the format of a file from its content
    pub fn detect_file(&self, input_file: &Path) -> Result<FormatId> {
        let content = FileManager::read_subtitle_file(input_file)?;
        self.converter
            .detect(&content)
            .with_context(|| format!("Failed to detect the format of {:?}", input_file))
    }

    /// Internal representation of a file as pretty JSON
    pub fn inspect(&self, input_file: &Path) -> Result<String> {
        let document = self.load_file(input_file)?;
        document
            .to_internal_json()
            .context("Failed to serialize the internal representation")
    }

    /// Read and parse a file.
    ///
    /// The configured input format wins; otherwise the content is sniffed and,
    /// when that fails, the file extension decides.
    fn load_file(&self, input_file: &Path) -> Result<SubtitleDocument> {
        let content = FileManager::read_subtitle_file(input_file)?;

        let format = match self.config.input_format {
            Some(format) => Some(format),
            None => match self.converter.detect(&content) {
                Ok(format) => Some(format),
                Err(e) => {
                    let fallback = FileManager::format_from_extension(input_file);
                    if let Some(format) = fallback {
                        debug!("{}; falling back to the {} extension", e, format);
                    }
                    fallback
                }
            },
        };

        let format = format.ok_or_else(|| {
            anyhow!("Could not determine the subtitle format of {:?}", input_file)
        })?;

        self.converter
            .load(&content, Some(format.as_str()))
            .with_context(|| format!("Failed to parse {:?} as {}", input_file, format))
    }

    fn same_file(a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }
}

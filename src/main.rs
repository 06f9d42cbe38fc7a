// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use subconvert::app_config::{self, Config};
use subconvert::app_controller::Controller;
use subconvert::{FormatId, LineEnding};

/// CLI Wrapper for FormatId to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Srt,
    #[value(alias = "webvtt")]
    Vtt,
    Sbv,
}

impl From<CliFormat> for FormatId {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Srt => FormatId::Srt,
            CliFormat::Vtt => FormatId::Vtt,
            CliFormat::Sbv => FormatId::Sbv,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a subtitle file or every subtitle file in a directory (default command)
    Convert(ConvertArgs),

    /// Print the detected format of a subtitle file
    Detect {
        /// Subtitle file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Print the internal representation of a subtitle file as JSON
    Inspect {
        /// Subtitle file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Input format (detected from content when omitted)
        #[arg(short = 'F', long, value_enum)]
        from: Option<CliFormat>,
    },

    /// Generate shell completions for subconvert
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    options: ConvertOptionsArgs,
}

#[derive(clap::Args, Debug, Clone)]
struct ConvertOptionsArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    to: Option<CliFormat>,

    /// Input format (detected from content when omitted)
    #[arg(short = 'F', long, value_enum)]
    from: Option<CliFormat>,

    /// Shift every cue by this many seconds (may be negative)
    #[arg(short, long, allow_negative_numbers = true)]
    shift: Option<f64>,

    /// Output file, or output directory when the input is a directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Write CRLF line endings
    #[arg(long)]
    crlf: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subconvert - convert subtitles between SRT, WebVTT and SBV
#[derive(Parser, Debug)]
#[command(name = "subconvert")]
#[command(version)]
#[command(about = "Subtitle format conversion and time shifting")]
#[command(long_about = "subconvert reads SRT, WebVTT and SBV subtitles, optionally shifts their timings, and writes them in another format.

EXAMPLES:
    subconvert movie.srt -t vtt                # Convert to movie.vtt next to the input
    subconvert movie.vtt -t srt -s 2.5         # Convert and delay every cue by 2.5 seconds
    subconvert movie.srt -t srt -s -1 -o out.srt  # Shift only, into a new file
    subconvert /subs/ -t vtt -o /out/          # Convert a whole directory
    subconvert detect movie.txt                # Print the detected format
    subconvert inspect movie.vtt               # Dump the internal representation
    subconvert completions bash > subconvert.bash

CONFIGURATION:
    Defaults are read from conf.json when it exists. You can specify a different
    config file with --config-path. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    options: ConvertOptionsArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // The logger accepts everything; log::set_max_level does the filtering
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subconvert", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Detect { input_path }) => {
            let controller = Controller::with_config(Config::default())?;
            let format = controller.detect_file(&input_path)?;
            println!("{}", format);
            Ok(())
        }
        Some(Commands::Inspect { input_path, from }) => {
            let config = Config {
                input_format: from.map(FormatId::from),
                ..Config::default()
            };
            let controller = Controller::with_config(config)?;
            println!("{}", controller.inspect(&input_path)?);
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(&args.input_path, args.options),
        None => {
            // Default behavior - use top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            run_convert(&input_path, cli.options)
        }
    }
}

fn run_convert(input_path: &Path, options: ConvertOptionsArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = options.log_level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_default(&options.config_path)?;
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }
    debug!("Loaded configuration: {:?}", config);

    // Override config with CLI options if provided
    if let Some(to) = options.to {
        config.output_format = to.into();
    }
    if let Some(from) = options.from {
        config.input_format = Some(from.into());
    }
    if let Some(shift) = options.shift {
        config.shift_seconds = shift;
    }
    if options.force_overwrite {
        config.force_overwrite = true;
    }
    if options.crlf {
        config.line_ending = LineEnding::Crlf;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }

    let controller = Controller::with_config(config)?;

    if input_path.is_file() {
        if let Some(output) = controller.run(input_path, options.output.as_deref())? {
            info!("Success: {:?}", output);
        }
    } else if input_path.is_dir() {
        let summary = controller.run_folder(input_path, options.output.as_deref())?;
        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) failed to convert", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

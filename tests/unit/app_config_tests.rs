/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use log::LevelFilter;
use subconvert::app_config::{Config, LogLevel};
use subconvert::{FormatId, LineEnding};

use crate::common;

#[test]
fn test_default_shouldConvertToSrtWithoutShift() {
    let config = Config::default();

    assert_eq!(config.output_format, FormatId::Srt);
    assert_eq!(config.input_format, None);
    assert_eq!(config.line_ending, LineEnding::Lf);
    assert_eq!(config.shift_seconds, 0.0);
    assert!(!config.force_overwrite);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "output_format": "vtt", "shift_seconds": -1.5, "line_ending": "crlf" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.output_format, FormatId::Vtt);
    assert_eq!(config.shift_seconds, -1.5);
    assert_eq!(config.line_ending, LineEnding::Crlf);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.convert_options().line_ending, LineEnding::Crlf);
    Ok(())
}

#[test]
fn test_fromFile_withUnknownFormat_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", r#"{ "output_format": "ass" }"#)?;

    let err = Config::from_file(&path).unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_loadOrDefault_withMissingFile_shouldNotCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config, Config::default());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    let config = Config {
        output_format: FormatId::Sbv,
        input_format: Some(FormatId::Vtt),
        shift_seconds: 2.25,
        force_overwrite: true,
        log_level: LogLevel::Debug,
        ..Config::default()
    };

    config.save(&path)?;

    assert_eq!(Config::from_file(&path)?, config);
    Ok(())
}

#[test]
fn test_validate_withNonFiniteShift_shouldFail() {
    let config = Config {
        shift_seconds: f64::NAN,
        ..Config::default()
    };

    assert!(config.validate().is_err());
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_logLevel_intoLevelFilter_shouldMap() {
    assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
    assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
}

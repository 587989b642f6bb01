/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use resub::app_config::{Config, LogLevel};
use resub::segmenter::SplitRule;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.segmentation.split_rule, SplitRule::Characters);
    assert_eq!(config.segmentation.min_duration_ms, 1);
    assert!(config.segmentation.dedupe_rolling_captions);
    assert_eq!(config.segmentation.min_overlap_words, 2);
    assert!(config.segmentation.extra_abbreviations.is_empty());
    assert_eq!(config.output.output_dir, "subtitles");
    assert_eq!(config.output.suffix, None);
    assert_eq!(config.output.concurrent_files, 4);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.segmentation.min_duration_ms = 0;
    assert!(config.validate().is_err());
    config.segmentation.min_duration_ms = 1;

    config.segmentation.min_overlap_words = 0;
    assert!(config.validate().is_err());
    config.segmentation.min_overlap_words = 3;
    assert!(config.validate().is_ok());

    config.segmentation.extra_abbreviations = vec!["approx".to_string(), "two words".to_string()];
    assert!(config.validate().is_err());
    config.segmentation.extra_abbreviations = vec!["approx".to_string()];

    config.output.concurrent_files = 0;
    assert!(config.validate().is_err());
    config.output.concurrent_files = 1;

    config.output.suffix = Some("a/b".to_string());
    assert!(config.validate().is_err());
    config.output.suffix = Some("sentences".to_string());

    assert!(config.validate().is_ok());
}

/// Test that JSON with only some fields gets defaults for the rest
#[test]
fn test_config_deserialization_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "segmentation": { "split_rule": "words", "extra_abbreviations": ["approx"] },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.segmentation.split_rule, SplitRule::Words);
    assert_eq!(config.segmentation.extra_abbreviations, vec!["approx".to_string()]);
    assert!(config.segmentation.dedupe_rolling_captions);
    assert_eq!(config.output.output_dir, "subtitles");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);

    Ok(())
}

/// Test that an unknown split rule is rejected
#[test]
fn test_config_deserialization_withUnknownSplitRule_shouldFail() {
    let json = r#"{ "segmentation": { "split_rule": "syllables" } }"#;
    assert!(serde_json::from_str::<Config>(json).is_err());
}

/// Test that a missing config file is created with defaults, then reloaded
#[test]
fn test_load_or_create_withMissingFile_shouldCreateDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let (config, created) = Config::load_or_create(&path)?;
    assert!(created);
    assert!(path.exists());
    assert_eq!(config, Config::default());

    let (reloaded, created) = Config::load_or_create(&path)?;
    assert!(!created);
    assert_eq!(reloaded, config);

    Ok(())
}

/// Test that a broken config file is reported
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(&temp_dir.path().to_path_buf(), "conf.json", "{ not json")?;

    let error = Config::load(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));

    Ok(())
}

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::segmenter::SegmentationOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Segmentation and cue cleanup settings
    #[serde(default)]
    pub segmentation: SegmentationOptions,

    /// Where and how results are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Directory receiving the re-segmented files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Optional suffix inserted before `.srt`, e.g. "sentences"
    #[serde(default)]
    pub suffix: Option<String>,

    /// Maximum number of files processed at once
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            suffix: None,
            concurrent_files: default_concurrent_files(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_files() -> usize {
    4
}

fn default_output_dir() -> String {
    "subtitles".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration, writing a default file first when none exists.
    /// Returns the config and whether it was freshly created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            return Ok((Self::load(path)?, false));
        }

        let config = Config::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let segmentation = &self.segmentation;

        if segmentation.min_duration_ms == 0 {
            return Err(anyhow!("segmentation.min_duration_ms must be at least 1"));
        }

        if segmentation.min_overlap_words == 0 {
            return Err(anyhow!("segmentation.min_overlap_words must be at least 1"));
        }

        if let Some(bad) = segmentation
            .extra_abbreviations
            .iter()
            .find(|a| a.trim().is_empty() || a.trim().contains(char::is_whitespace))
        {
            return Err(anyhow!("Invalid abbreviation in segmentation.extra_abbreviations: {:?}", bad));
        }

        if self.output.concurrent_files == 0 {
            return Err(anyhow!("output.concurrent_files must be at least 1"));
        }

        if self.output.output_dir.trim().is_empty() {
            return Err(anyhow!("output.output_dir must not be empty"));
        }

        if let Some(suffix) = &self.output.suffix {
            if suffix.contains(['/', '\\']) {
                return Err(anyhow!("output.suffix must not contain path separators: {}", suffix));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            segmentation: SegmentationOptions::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::subtitle_processor::SubtitleFormat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Transcript language code (ISO); detected when absent
    #[serde(default)]
    pub language: Option<String>,

    /// Output subtitle format
    #[serde(default)]
    pub output_format: SubtitleFormat,

    /// Boundary detection strategy
    #[serde(default)]
    pub boundaries: BoundaryStrategy,

    /// Optional entity definition file
    #[serde(default)]
    pub entities_file: Option<PathBuf>,

    /// Segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Buffer adjustment settings
    #[serde(default)]
    pub adjustment: AdjustmentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Boundary detection strategy
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryStrategy {
    // @strategy: Language rules (abbreviations, clauses, entities)
    #[default]
    Rules,
    // @strategy: Terminal punctuation only, any language
    Punctuation,
}

impl std::fmt::Display for BoundaryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rules => write!(f, "rules"),
            Self::Punctuation => write!(f, "punctuation"),
        }
    }
}

/// Segmentation engine settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Maximum characters per line
    #[serde(default = "default_max_width")]
    pub max_width: usize,

    /// Maximum lines per cue (1 to 3)
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Only break cues at sentence ends and line limits, never at commas
    #[serde(default)]
    pub punctuation_only: bool,

    /// Chunks with more words than this are split at a clause boundary
    #[serde(default = "default_comma_split_threshold")]
    pub comma_split_threshold: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_lines: default_max_lines(),
            punctuation_only: false,
            comma_split_threshold: default_comma_split_threshold(),
        }
    }
}

impl SegmentationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(anyhow!("max_width must be at least 1"));
        }
        if !(1..=3).contains(&self.max_lines) {
            return Err(anyhow!("max_lines must be between 1 and 3, got {}", self.max_lines));
        }
        if self.comma_split_threshold == 0 {
            return Err(anyhow!("comma_split_threshold must be at least 1"));
        }
        Ok(())
    }
}

/// Buffer adjuster settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AdjustmentConfig {
    /// Seconds added to each cue end
    #[serde(default = "default_buffer_seconds")]
    pub buffer_seconds: f64,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            buffer_seconds: default_buffer_seconds(),
        }
    }
}

impl AdjustmentConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.buffer_seconds.is_finite() || self.buffer_seconds < 0.0 {
            return Err(anyhow!(
                "buffer_seconds must be a non-negative number, got {}",
                self.buffer_seconds
            ));
        }
        Ok(())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_width() -> usize {
    42
}

fn default_max_lines() -> usize {
    2
}

fn default_comma_split_threshold() -> usize {
    7
}

fn default_buffer_seconds() -> f64 {
    0.2
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(language) = &self.language {
            let _name = crate::language_utils::get_language_name(language)?;
        }

        self.segmentation.validate()?;
        self.adjustment.validate()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: None,
            output_format: SubtitleFormat::default(),
            boundaries: BoundaryStrategy::default(),
            entities_file: None,
            segmentation: SegmentationConfig::default(),
            adjustment: AdjustmentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

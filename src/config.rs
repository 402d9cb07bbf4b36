use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{DistanceModel, MIN_PERSONS};
use crate::models::GroupingParams;
use crate::services::SurveyLayout;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub grouping: GroupingParams,
    #[serde(default)]
    pub survey: SurveySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveySettings {
    #[serde(default = "default_likert_len")]
    pub likert_len: usize,
    #[serde(default = "default_likert_min")]
    pub likert_min: u8,
    #[serde(default = "default_likert_max")]
    pub likert_max: u8,
    #[serde(default = "default_category_penalty")]
    pub category_penalty: u32,
    #[serde(default = "default_min_persons")]
    pub min_persons: usize,
    #[serde(default = "default_skip_columns")]
    pub skip_columns: usize,
    #[serde(default = "default_has_header")]
    pub has_header: bool,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            likert_len: default_likert_len(),
            likert_min: default_likert_min(),
            likert_max: default_likert_max(),
            category_penalty: default_category_penalty(),
            min_persons: default_min_persons(),
            skip_columns: default_skip_columns(),
            has_header: default_has_header(),
        }
    }
}

fn default_likert_len() -> usize { 5 }
fn default_likert_min() -> u8 { 1 }
fn default_likert_max() -> u8 { 5 }
fn default_category_penalty() -> u32 { 4 }
fn default_min_persons() -> usize { MIN_PERSONS }
fn default_skip_columns() -> usize { 1 }
fn default_has_header() -> bool { true }

impl SurveySettings {
    pub fn distance_model(&self) -> DistanceModel {
        DistanceModel::new(self.likert_len, self.category_penalty)
    }

    pub fn layout(&self) -> SurveyLayout {
        SurveyLayout {
            skip_columns: self.skip_columns,
            likert_len: self.likert_len,
            likert_min: self.likert_min,
            likert_max: self.likert_max,
            has_header: self.has_header,
            min_persons: self.min_persons,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with GROUPER__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GROUPER__GROUPING__RESTARTS -> grouping.restarts
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("GROUPER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// Catalog endpoint settings
    #[serde(default)]
    pub api: ApiSection,

    /// Ad placeholder settings
    #[serde(default)]
    pub ads: AdsSection,

    /// Local persistence settings
    #[serde(default)]
    pub storage: StorageSection,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Catalog endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSection {
    /// Base URL of the catalog host (client default when unset)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Catalog channel: `release` or `debug`
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Catalog language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: None,
            channel: default_channel(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_channel() -> String {
    "release".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Ad placeholder configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdsSection {
    /// Number of apps between two ad placeholders (`<= 0` disables them)
    #[serde(default = "default_ad_frequency")]
    pub frequency: i32,
}

impl Default for AdsSection {
    fn default() -> Self {
        Self {
            frequency: default_ad_frequency(),
        }
    }
}

fn default_ad_frequency() -> i32 {
    4
}

/// Local persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageSection {
    /// Directory holding `preferences.json` (platform data dir when unset)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// Default level filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

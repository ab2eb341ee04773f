//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the persisted preferences document
const PREFERENCES_FILE: &str = "preferences.json";

/// Directory name under the platform data dir
const APP_DIR: &str = "app-toolkit";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed schema
    pub schema: ConfigSchema,
    /// File the schema was loaded from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when none is present.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let Some(config_path) = path.map(String::from).or_else(find_config_file) else {
            return Ok(Self::default());
        };

        debug!(path = %config_path, "Loading configuration file");
        let content = std::fs::read_to_string(&config_path)
            .map_err(Error::from)
            .context(format!("Failed to read config file {config_path}"))?;

        let mut config =
            Self::from_toml(&content).context(format!("Invalid config file {config_path}"))?;
        config.path = Some(config_path);
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = Self {
            schema: toml::from_str(content)?,
            path: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let api = &self.schema.api;

        if !matches!(api.channel.as_str(), "release" | "debug") {
            return Err(Error::invalid_config_value(
                "api.channel",
                format!("expected `release` or `debug`, got `{}`", api.channel),
            ));
        }

        if api.language.trim().is_empty() {
            return Err(Error::invalid_config_value("api.language", "cannot be empty"));
        }

        if api.timeout_secs == 0 {
            return Err(Error::invalid_config_value("api.timeout_secs", "cannot be zero"));
        }

        Ok(())
    }

    /// Directory holding local state
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.schema.storage.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from(".local/share"))
                .join(APP_DIR)
        })
    }

    /// Location of the preferences document
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join(PREFERENCES_FILE)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        "app-toolkit.toml",
        ".app-toolkit.toml",
        ".config/app-toolkit.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

//! Configuration for the App Toolkit API client
//!
//! Every field has a default; callers layer their own settings on top with
//! the builder methods.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default catalog host
const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/apptoolkit/catalog-api/main/v1";

/// Default catalog language
const DEFAULT_LANGUAGE: &str = "en";

/// Catalog channel
///
/// Each channel is published under its own path so a debug build can test
/// catalog changes before they reach release users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Catalog served to release builds
    #[default]
    Release,
    /// Catalog served to debug builds
    Debug,
}

impl Channel {
    /// Path segment for this channel
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        match s.to_lowercase().as_str() {
            "release" | "prod" | "production" => Ok(Self::Release),
            "debug" | "dev" | "development" => Ok(Self::Debug),
            other => Err(ApiError::config(format!("unknown catalog channel `{other}`"))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog host, without the channel/language path
    pub base_url: String,
    /// Catalog channel
    pub channel: Channel,
    /// Catalog language code
    pub language: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            channel: Channel::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the channel
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Builder-style method to set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the catalog document relative to `base_url`
    #[must_use]
    pub fn catalog_path(&self) -> String {
        format!("{}/{}/home/api_android_apps.json", self.channel, self.language)
    }

    /// Absolute catalog URL
    #[must_use]
    pub fn catalog_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.catalog_path())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.language.trim().is_empty() {
            return Err(ApiError::config("language cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

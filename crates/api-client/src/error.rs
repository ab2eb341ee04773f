//! Error types for the API client

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server answered with a non-success status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Response body, or a placeholder when unreadable
        message: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Classify the failure for presentation
    #[must_use]
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::Request(e) => {
                if e.is_timeout() {
                    LoadErrorKind::Timeout
                } else if e.is_connect() {
                    LoadErrorKind::NoConnectivity
                } else if e.is_decode() {
                    LoadErrorKind::Serialization
                } else {
                    LoadErrorKind::LoadFailed
                }
            }
            Self::Json(_) => LoadErrorKind::Serialization,
            Self::Config(_) | Self::ApiResponse { .. } | Self::InvalidUrl(_) => {
                LoadErrorKind::LoadFailed
            }
        }
    }
}

/// Failure categories surfaced to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    /// The request did not complete within the client timeout
    Timeout,
    /// No connection to the catalog host could be established
    NoConnectivity,
    /// The response body was not a valid catalog document
    Serialization,
    /// Any other failure, including non-success HTTP statuses
    LoadFailed,
}

impl LoadErrorKind {
    /// Short user-facing description
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Timeout => "The request timed out",
            Self::NoConnectivity => "No internet connection",
            Self::Serialization => "The catalog could not be read",
            Self::LoadFailed => "Failed to load apps",
        }
    }
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

//! Core utilities for App Toolkit
//!
//! This crate provides the pieces shared by the catalog pipeline and the
//! command-line front end:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for every key
//! - **Preferences**: Durable key-value state (favorites, ads, theme, onboarding)
//!
//! # Example
//!
//! ```rust,no_run
//! use apptoolkit_core::{config::Config, preferences::PreferenceStore};
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let store = PreferenceStore::open(config.preferences_path()).expect("unreadable preferences");
//!
//! let prefs = store.snapshot();
//! println!("{} favorites, ads enabled: {}", prefs.favorites.len(), prefs.ads_enabled);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod preferences;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::preferences::{PreferenceStore, Preferences, Theme};
}

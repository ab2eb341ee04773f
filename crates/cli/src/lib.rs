//! CLI utilities for App Toolkit
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - App list rendering
//! - Spinners for network work

#![warn(missing_docs)]

pub mod output;
pub mod progress;

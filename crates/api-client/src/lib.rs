//! HTTP client for the App Toolkit app catalog
//!
//! This crate fetches the remote, versioned JSON catalog that lists a
//! developer's apps and exposes it as typed wire DTOs.
//!
//! # Features
//!
//! - **Layered configuration**: Catalog host, channel, language and timeout with defaults for each
//! - **Single-shot requests**: One request per call, no hidden retries
//! - **Error taxonomy**: Every failure maps onto a [`LoadErrorKind`] the UI can present
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use apptoolkit_api_client::{AppToolkitClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AppToolkitClient::with_config(ClientConfig::default().with_language("de"))?;
//!
//!     let (catalog, elapsed) = client.catalog().fetch_timed().await?;
//!     println!("Catalog lists {} apps ({elapsed:?})", catalog.data.apps.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::AppToolkitClient;
pub use config::{Channel, ClientConfig};
pub use error::{ApiError, ApiResult, LoadErrorKind};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::AppToolkitClient;
    pub use crate::config::{Channel, ClientConfig};
    pub use crate::endpoints::catalog::{AppDto, CatalogResponse, CategoryDto, ScreenshotDto};
    pub use crate::endpoints::CatalogApi;
    pub use crate::error::{ApiError, ApiResult, LoadErrorKind};
}

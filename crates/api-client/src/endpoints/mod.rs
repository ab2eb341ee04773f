//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of catalog endpoints.
//!
//! | Module | Document | Description |
//! |--------|----------|-------------|
//! | `catalog` | `{channel}/{language}/home/api_android_apps.json` | Developer app catalog |

pub mod catalog;

pub use catalog::CatalogApi;

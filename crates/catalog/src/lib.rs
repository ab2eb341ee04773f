//! App catalog pipeline
//!
//! Fetches the remote app catalog, maps it onto sanitized domain objects,
//! joins it with the locally persisted favorites and interleaves ad
//! placeholders for display while the persisted ad preference is on:
//!
//! ```text
//! fetch → map → combine with favorites → build list items → presentation
//! ```
//!
//! Every stage is exposed as a [`futures::Stream`]. Dropping a stream
//! cancels whatever work it has in flight.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use apptoolkit_api_client::{AppToolkitClient, ClientConfig};
//! use apptoolkit_catalog::prelude::*;
//! use apptoolkit_core::preferences::PreferenceStore;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AppToolkitClient::with_config(ClientConfig::default())?;
//!     let store = Arc::new(PreferenceStore::open("/tmp/app-toolkit/preferences.json")?);
//!
//!     let preferences = Arc::new(StorePreferencesRepository::new(store));
//!
//!     let listings = AppListings::new(
//!         Arc::new(RemoteCatalogRepository::new(client)),
//!         preferences.clone(),
//!         preferences,
//!     );
//!
//!     let mut favorites = listings.observe_favorite_apps();
//!     while let Some(state) = favorites.next().await {
//!         println!("{state:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combiner;
pub mod favorites;
pub mod flow;
pub mod list_items;
pub mod mapper;
pub mod model;
pub mod preferences;
pub mod repository;
pub mod state;

pub use combiner::{AppListings, AppsView};
pub use favorites::FavoritesRepository;
pub use list_items::build_list_items;
pub use model::{AppCategory, AppInfo, AppListItem};
pub use preferences::{AdPreferenceRepository, StorePreferencesRepository};
pub use repository::{CatalogRepository, InMemoryCatalogRepository, RemoteCatalogRepository};
pub use state::DataState;

pub use apptoolkit_api_client::LoadErrorKind;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::combiner::{AppListings, AppsView};
    pub use crate::favorites::FavoritesRepository;
    pub use crate::list_items::build_list_items;
    pub use crate::model::{AppCategory, AppInfo, AppListItem};
    pub use crate::preferences::{AdPreferenceRepository, StorePreferencesRepository};
    pub use crate::repository::{CatalogRepository, RemoteCatalogRepository};
    pub use crate::state::DataState;
    pub use apptoolkit_api_client::LoadErrorKind;
}

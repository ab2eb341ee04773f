//! Joins the catalog with favorites and builds displayed lists

use crate::favorites::FavoritesRepository;
use crate::flow::{combine_latest, distinct_until_changed};
use crate::list_items::build_list_items;
use crate::model::{AppInfo, AppListItem};
use crate::preferences::AdPreferenceRepository;
use crate::repository::CatalogRepository;
use crate::state::DataState;
use futures::stream::{BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Which apps a list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppsView {
    /// Every catalog app
    #[default]
    All,
    /// Favorited apps only
    Favorites,
}

/// App lists for the presentation layer
///
/// Each call starts a fresh pipeline with its own catalog request.
#[derive(Clone)]
pub struct AppListings {
    catalog: Arc<dyn CatalogRepository>,
    favorites: Arc<dyn FavoritesRepository>,
    ads: Arc<dyn AdPreferenceRepository>,
}

impl AppListings {
    /// Create listings from explicit repositories
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        favorites: Arc<dyn FavoritesRepository>,
        ads: Arc<dyn AdPreferenceRepository>,
    ) -> Self {
        Self {
            catalog,
            favorites,
            ads,
        }
    }

    /// Favorites repository shared with this pipeline
    #[must_use]
    pub fn favorites(&self) -> &Arc<dyn FavoritesRepository> {
        &self.favorites
    }

    /// Every catalog app
    pub fn observe_all_apps(&self) -> BoxStream<'static, DataState<Vec<AppInfo>>> {
        distinct_until_changed(self.catalog.fetch_catalog()).boxed()
    }

    /// Catalog apps that are favorites, in catalog order
    ///
    /// Recomputed whenever the catalog state or the favorites change;
    /// consecutive equal states are emitted once.
    pub fn observe_favorite_apps(&self) -> BoxStream<'static, DataState<Vec<AppInfo>>> {
        let combined = combine_latest(
            self.catalog.fetch_catalog(),
            self.favorites.observe_favorites(),
            |state: &DataState<Vec<AppInfo>>, favorites: &BTreeSet<String>| {
                state.as_ref().map(|apps| filter_favorites(apps, favorites))
            },
        );
        distinct_until_changed(combined).boxed()
    }

    /// Displayed list items for `view`
    ///
    /// An ad placeholder follows every `frequency` apps while the persisted
    /// ad preference is on; the list is rebuilt whenever that preference
    /// changes.
    pub fn observe_list_items(
        &self,
        view: AppsView,
        frequency: i32,
    ) -> BoxStream<'static, DataState<Vec<AppListItem>>> {
        let source = match view {
            AppsView::All => self.observe_all_apps(),
            AppsView::Favorites => self.observe_favorite_apps(),
        };
        let items = combine_latest(
            source,
            self.ads.observe_ads_enabled(),
            move |state: &DataState<Vec<AppInfo>>, ads_enabled: &bool| {
                state.as_ref().map(|apps| build_list_items(apps, *ads_enabled, frequency))
            },
        );
        distinct_until_changed(items).boxed()
    }
}

/// Apps whose package is in `favorites`, keeping `apps` order
///
/// Favorites that are not in the catalog are ignored.
#[must_use]
pub fn filter_favorites(apps: &[AppInfo], favorites: &BTreeSet<String>) -> Vec<AppInfo> {
    apps.iter()
        .filter(|app| favorites.contains(&app.package_name))
        .cloned()
        .collect()
}

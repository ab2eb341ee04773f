//! Favorites repository

use apptoolkit_core::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::BTreeSet;

/// Favorited package identifiers
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Current set, then every change
    fn observe_favorites(&self) -> BoxStream<'static, BTreeSet<String>>;

    /// Current set
    fn favorites(&self) -> BTreeSet<String>;

    /// Add `package` if absent, remove it if present
    ///
    /// Returns whether the package is a favorite afterwards. The change is
    /// durable before observers see it.
    async fn toggle_favorite(&self, package: &str) -> Result<bool>;
}

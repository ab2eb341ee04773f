//! Repositories backed by the local preference store

use crate::favorites::FavoritesRepository;
use crate::flow::{distinct_until_changed, watch_stream};
use apptoolkit_core::error::{Error, ErrorCode, Result};
use apptoolkit_core::preferences::{PreferenceStore, Preferences};
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::info;

/// Whether ad placeholders are shown
pub trait AdPreferenceRepository: Send + Sync {
    /// Current setting, then every change
    fn observe_ads_enabled(&self) -> BoxStream<'static, bool>;
}

/// Favorites and the ad preference kept in a [`PreferenceStore`]
///
/// Every change goes through [`StorePreferencesRepository::update`], which
/// persists the document and then publishes it to observers.
pub struct StorePreferencesRepository {
    store: Arc<PreferenceStore>,
    sender: Arc<watch::Sender<Preferences>>,
    write_lock: Arc<Mutex<()>>,
}

impl StorePreferencesRepository {
    /// Create a repository over `store`
    #[must_use]
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        let (sender, _) = watch::channel(store.snapshot());
        Self {
            store,
            sender: Arc::new(sender),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current preferences
    #[must_use]
    pub fn snapshot(&self) -> Preferences {
        self.sender.borrow().clone()
    }

    /// Apply `f` to the preferences, persist them, then publish them
    ///
    /// Returns the closure's result and the document as written. On failure
    /// neither the store nor the observers see any change.
    pub async fn update<R>(
        &self,
        f: impl FnOnce(&mut Preferences) -> R + Send + 'static,
    ) -> Result<(R, Preferences)>
    where
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let sender = Arc::clone(&self.sender);
        let write_lock = Arc::clone(&self.write_lock);

        // Persist and publish on the blocking pool under one lock so that
        // observers see changes in write order, even if this future is dropped.
        tokio::task::spawn_blocking(move || -> Result<(R, Preferences)> {
            let _guard = write_lock
                .lock()
                .map_err(|_| Error::new(ErrorCode::Internal, "Failed to acquire preferences lock"))?;

            let (output, prefs) = store.update(f)?;
            sender.send_replace(prefs.clone());
            Ok((output, prefs))
        })
        .await
        .map_err(|e| Error::new(ErrorCode::Internal, format!("Preferences task failed: {e}")))?
    }

    fn observe<T>(&self, field: fn(&Preferences) -> T) -> BoxStream<'static, T>
    where
        T: PartialEq + Clone + Send + 'static,
    {
        let values = watch_stream(self.sender.subscribe()).map(move |prefs| field(&prefs));
        distinct_until_changed(values).boxed()
    }
}

#[async_trait]
impl FavoritesRepository for StorePreferencesRepository {
    fn observe_favorites(&self) -> BoxStream<'static, BTreeSet<String>> {
        self.observe(|prefs| prefs.favorites.clone())
    }

    fn favorites(&self) -> BTreeSet<String> {
        self.sender.borrow().favorites.clone()
    }

    async fn toggle_favorite(&self, package: &str) -> Result<bool> {
        let package = package.trim().to_string();
        if package.is_empty() {
            return Err(Error::validation("Package identifier cannot be empty"));
        }

        let logged = package.clone();
        let (is_favorite, _) = self
            .update(move |p| {
                if p.favorites.remove(&package) {
                    false
                } else {
                    p.favorites.insert(package);
                    true
                }
            })
            .await?;

        info!(package = %logged, favorite = is_favorite, "Favorite toggled");
        Ok(is_favorite)
    }
}

impl AdPreferenceRepository for StorePreferencesRepository {
    fn observe_ads_enabled(&self) -> BoxStream<'static, bool> {
        self.observe(|prefs| prefs.ads_enabled)
    }
}

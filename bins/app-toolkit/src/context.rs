//! Wiring of configuration, storage and the catalog pipeline

use crate::OutputFormat;
use anyhow::{Context, Result};
use apptoolkit_api_client::{AppToolkitClient, Channel, ClientConfig};
use apptoolkit_catalog::{AppListings, RemoteCatalogRepository, StorePreferencesRepository};
use apptoolkit_core::config::Config;
use apptoolkit_core::preferences::PreferenceStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Everything a command needs
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
    pub store: Arc<PreferenceStore>,
    pub preferences: Arc<StorePreferencesRepository>,
}

impl AppContext {
    /// Open local storage; network clients are created on demand
    pub fn build(config: Config, format: OutputFormat) -> apptoolkit_core::Result<Self> {
        let path = config.preferences_path();
        debug!(path = %path.display(), "Opening preferences");

        let store = Arc::new(PreferenceStore::open(path)?);
        let preferences = Arc::new(StorePreferencesRepository::new(Arc::clone(&store)));

        Ok(Self {
            config,
            format,
            store,
            preferences,
        })
    }

    /// Whether output should be JSON
    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Client configuration derived from the loaded configuration
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api = &self.config.schema.api;
        let channel: Channel = api.channel.parse()?;

        let mut client_config = ClientConfig::default()
            .with_channel(channel)
            .with_language(api.language.clone())
            .with_timeout(Duration::from_secs(api.timeout_secs));
        if let Some(ref url) = api.base_url {
            client_config = client_config.with_base_url(url.clone());
        }
        Ok(client_config)
    }

    /// Catalog pipeline sharing this context's preferences
    pub fn listings(&self) -> Result<AppListings> {
        let client_config = self.client_config()?;
        debug!(url = %client_config.catalog_url(), "Catalog endpoint");

        let client = AppToolkitClient::with_config(client_config)
            .context("Invalid catalog client configuration")?;

        Ok(AppListings::new(
            Arc::new(RemoteCatalogRepository::new(client)),
            self.preferences.clone(),
            self.preferences.clone(),
        ))
    }

    /// Ad frequency from the command line or configuration; 0 turns ads off
    pub fn ad_frequency(&self, force_off: bool, frequency: Option<i32>) -> i32 {
        if force_off {
            0
        } else {
            frequency.unwrap_or(self.config.schema.ads.frequency)
        }
    }
}

//! Catalog repositories

use crate::mapper::map_catalog;
use crate::model::AppInfo;
use crate::state::DataState;
use apptoolkit_api_client::AppToolkitClient;
use apptoolkit_telemetry::metrics;
use async_stream::stream;
use futures::stream::{self, BoxStream, StreamExt};
use tracing::{info, warn};

/// Source of the app catalog
pub trait CatalogRepository: Send + Sync {
    /// Load the catalog once
    ///
    /// Emits `Loading(None)` and then exactly one terminal state. Apps are
    /// sorted by name, ignoring case.
    fn fetch_catalog(&self) -> BoxStream<'static, DataState<Vec<AppInfo>>>;
}

/// Catalog fetched from the remote JSON document
#[derive(Clone)]
pub struct RemoteCatalogRepository {
    client: AppToolkitClient,
}

impl RemoteCatalogRepository {
    /// Create a repository backed by `client`
    #[must_use]
    pub fn new(client: AppToolkitClient) -> Self {
        Self { client }
    }
}

impl CatalogRepository for RemoteCatalogRepository {
    fn fetch_catalog(&self) -> BoxStream<'static, DataState<Vec<AppInfo>>> {
        let api = self.client.catalog();
        let url = self.client.config().catalog_url();

        Box::pin(stream! {
            yield DataState::Loading(None);

            match api.fetch_timed().await {
                Ok((response, elapsed)) => {
                    metrics().record_duration("catalog.fetch_ms", elapsed);
                    let mut apps = map_catalog(response);
                    sort_by_name(&mut apps);
                    metrics().gauge("catalog.apps", apps.len() as u64);
                    info!(url = %url, apps = apps.len(), elapsed_ms = elapsed.as_millis(), "Catalog loaded");
                    yield DataState::Success(apps);
                }
                Err(err) => {
                    let kind = err.kind();
                    metrics().increment("catalog.fetch.failures");
                    warn!(url = %url, error = %err, kind = ?kind, "Catalog fetch failed");
                    yield DataState::Error(kind);
                }
            }
        })
    }
}

/// Catalog with a fixed result, for tests and offline previews
#[derive(Debug, Clone)]
pub struct InMemoryCatalogRepository {
    outcome: DataState<Vec<AppInfo>>,
}

impl InMemoryCatalogRepository {
    /// Repository that always loads `apps`
    #[must_use]
    pub fn with_apps(mut apps: Vec<AppInfo>) -> Self {
        sort_by_name(&mut apps);
        Self {
            outcome: DataState::Success(apps),
        }
    }

    /// Repository that always fails with `kind`
    #[must_use]
    pub fn failing(kind: apptoolkit_api_client::LoadErrorKind) -> Self {
        Self {
            outcome: DataState::Error(kind),
        }
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn fetch_catalog(&self) -> BoxStream<'static, DataState<Vec<AppInfo>>> {
        stream::iter([DataState::Loading(None), self.outcome.clone()]).boxed()
    }
}

/// Sort apps by name, ignoring case; equal names keep their order
pub fn sort_by_name(apps: &mut [AppInfo]) {
    apps.sort_by_cached_key(|app| app.name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use apptoolkit_api_client::{ClientConfig, LoadErrorKind};
    use httpmock::prelude::*;
    use std::time::Duration;

    const CATALOG_PATH: &str = "/release/en/home/api_android_apps.json";

    fn repository_for(base_url: &str, timeout: Duration) -> RemoteCatalogRepository {
        let config = ClientConfig::default()
            .with_base_url(base_url)
            .with_timeout(timeout);
        RemoteCatalogRepository::new(AppToolkitClient::with_config(config).unwrap())
    }

    async fn collect(repository: &impl CatalogRepository) -> Vec<DataState<Vec<AppInfo>>> {
        repository.fetch_catalog().collect().await
    }

    #[test]
    fn test_sort_is_case_insensitive_and_stable() {
        let mut apps = vec![
            AppInfo::new("beta", "com.example.beta"),
            AppInfo::new("Alpha", "com.example.alpha"),
            AppInfo::new("alpha", "com.example.alpha2"),
            AppInfo::new("Charlie", "com.example.charlie"),
        ];
        sort_by_name(&mut apps);

        let packages: Vec<_> = apps.iter().map(|a| a.package_name.as_str()).collect();
        assert_eq!(
            packages,
            vec!["com.example.alpha", "com.example.alpha2", "com.example.beta", "com.example.charlie"]
        );
    }

    #[tokio::test]
    async fn test_fetch_emits_loading_then_sorted_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(200).json_body(serde_json::json!({
                    "data": { "apps": [
                        { "name": "zeta Player", "packageName": "com.example.zeta", "iconLogo": "https://cdn.example.com/z.png" },
                        { "name": "Alarm", "packageName": "com.example.alarm", "iconLogo": " " },
                        { "name": "music", "packageName": "com.example.music", "iconLogo": "" }
                    ] }
                }));
            })
            .await;

        let states = collect(&repository_for(&server.base_url(), Duration::from_secs(2))).await;
        mock.assert_async().await;

        assert_eq!(states.len(), 2);
        assert_eq!(states[0], DataState::Loading(None));
        let DataState::Success(apps) = &states[1] else {
            panic!("expected success, got {:?}", states[1]);
        };
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Alarm", "music", "zeta Player"]);
        assert!(apps[0].icon_url.is_none());

        let fetches = metrics().snapshot().durations["catalog.fetch_ms"].count;
        assert!(fetches >= 1);
    }

    #[tokio::test]
    async fn test_null_icon_does_not_fail_the_catalog() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(200).json_body(serde_json::json!({
                    "data": { "apps": [
                        { "name": "Notes", "packageName": "com.example.notes", "iconLogo": null },
                        { "name": "Timer", "packageName": "com.example.timer", "iconLogo": "https://cdn.example.com/t.png" }
                    ] }
                }));
            })
            .await;

        let states = collect(&repository_for(&server.base_url(), Duration::from_secs(2))).await;
        let DataState::Success(apps) = &states[1] else {
            panic!("expected success, got {:?}", states[1]);
        };
        assert_eq!(apps.len(), 2);
        assert!(apps[0].icon_url.is_none());
        assert_eq!(apps[1].icon_url.as_deref(), Some("https://cdn.example.com/t.png"));
    }

    #[tokio::test]
    async fn test_http_error_maps_to_load_failed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(404);
            })
            .await;

        let states = collect(&repository_for(&server.base_url(), Duration::from_secs(2))).await;
        assert_eq!(states.last(), Some(&DataState::Error(LoadErrorKind::LoadFailed)));
    }

    #[tokio::test]
    async fn test_malformed_document_maps_to_serialization() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(200).json_body(serde_json::json!({ "data": { "apps": "nope" } }));
            })
            .await;

        let states = collect(&repository_for(&server.base_url(), Duration::from_secs(2))).await;
        assert_eq!(states.last(), Some(&DataState::Error(LoadErrorKind::Serialization)));
    }

    #[tokio::test]
    async fn test_slow_server_maps_to_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(serde_json::json!({ "data": { "apps": [] } }));
            })
            .await;

        let states = collect(&repository_for(&server.base_url(), Duration::from_millis(100))).await;
        assert_eq!(states.last(), Some(&DataState::Error(LoadErrorKind::Timeout)));
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_no_connectivity() {
        // Port 9 (discard) is closed on test machines; the connect is refused.
        let states = collect(&repository_for("http://127.0.0.1:9", Duration::from_secs(2))).await;
        assert_eq!(states.last(), Some(&DataState::Error(LoadErrorKind::NoConnectivity)));
    }

    #[tokio::test]
    async fn test_dropping_the_stream_cancels_without_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(CATALOG_PATH);
                then.status(200)
                    .delay(Duration::from_secs(5))
                    .json_body(serde_json::json!({ "data": { "apps": [] } }));
            })
            .await;

        let repository = repository_for(&server.base_url(), Duration::from_secs(10));
        let mut states = repository.fetch_catalog();
        assert_eq!(states.next().await, Some(DataState::Loading(None)));

        let next = tokio::time::timeout(Duration::from_millis(100), states.next()).await;
        assert!(next.is_err());
        drop(states);
    }

    #[tokio::test]
    async fn test_in_memory_repository() {
        let repository = InMemoryCatalogRepository::with_apps(vec![
            AppInfo::new("b", "com.example.b"),
            AppInfo::new("A", "com.example.a"),
        ]);
        let states = collect(&repository).await;
        let DataState::Success(apps) = &states[1] else {
            panic!("expected success");
        };
        assert_eq!(apps[0].package_name, "com.example.a");

        let failing = InMemoryCatalogRepository::failing(LoadErrorKind::NoConnectivity);
        assert_eq!(
            collect(&failing).await,
            vec![DataState::Loading(None), DataState::Error(LoadErrorKind::NoConnectivity)]
        );
    }
}

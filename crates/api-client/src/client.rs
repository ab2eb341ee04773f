//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::CatalogApi;
use crate::error::{ApiError, ApiResult};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// App Toolkit catalog client
///
/// Thin wrapper around `reqwest` that adds:
/// - Base URL handling for the versioned catalog layout
/// - Request correlation IDs for tracing
/// - Status and body handling that maps every failure to [`ApiError`]
///
/// Requests are never retried. Dropping a returned future cancels the
/// request in flight.
#[derive(Clone)]
pub struct AppToolkitClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl AppToolkitClient {
    /// Create a client for `config`
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("apptoolkit-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Access catalog endpoints
    #[must_use]
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    /// Perform a GET request relative to the base URL
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        self.get_url(&url).await
    }

    /// Perform a GET request to an absolute URL
    #[instrument(skip(self))]
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(url.to_string()));
        }

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();

        let result = self.execute_request(&request_id, url).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => debug!(
                request_id = %request_id,
                elapsed_ms = elapsed.as_millis(),
                "Request succeeded"
            ),
            Err(e) => warn!(
                request_id = %request_id,
                elapsed_ms = elapsed.as_millis(),
                error = %e,
                "Request failed"
            ),
        }

        result
    }

    /// Perform a GET request and report how long it took
    pub async fn timed_get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<(T, Duration)> {
        let start = Instant::now();
        let result = self.get(path).await?;
        Ok((result, start.elapsed()))
    }

    /// Execute a single request
    async fn execute_request<T: DeserializeOwned>(&self, request_id: &str, url: &str) -> ApiResult<T> {
        debug!(request_id = %request_id, url = %url, "Sending request");

        let response = self
            .inner
            .get(url)
            .header(X_REQUEST_ID, request_id)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Check status, then deserialize the body
///
/// The body is decoded with `serde_json` directly so malformed documents
/// surface as [`ApiError::Json`] rather than a transport error.
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use httpmock::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Ping {
        ok: bool,
    }

    fn client_for(server: &MockServer) -> AppToolkitClient {
        let config = ClientConfig::default()
            .with_base_url(server.base_url())
            .with_timeout(Duration::from_secs(2));
        AppToolkitClient::with_config(config).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = AppToolkitClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("not-a-url");
        assert!(AppToolkitClient::with_config(config).is_err());
    }

    #[tokio::test]
    async fn test_get_sends_correlation_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/ping").header_exists(X_REQUEST_ID);
                then.status(200).json_body(serde_json::json!({ "ok": true }));
            })
            .await;

        let ping: Ping = client_for(&server).get("ping").await.unwrap();
        assert!(ping.ok);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ping");
                then.status(500).body("boom");
            })
            .await;

        let err = client_for(&server).get::<Ping>("ping").await.unwrap_err();
        assert!(matches!(err, ApiError::ApiResponse { status: 500, ref message } if message == "boom"));
        assert_eq!(err.kind(), LoadErrorKind::LoadFailed);
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ping");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server).get::<Ping>("ping").await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_relative_url_rejected() {
        let client = AppToolkitClient::with_config(ClientConfig::default()).unwrap();
        let err = client.get_url::<Ping>("catalog.json").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}

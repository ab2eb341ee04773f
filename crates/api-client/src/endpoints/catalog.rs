//! App catalog endpoint
//!
//! The catalog is a static JSON document published per channel and
//! language. It lists every app the developer wants to promote.

use crate::client::AppToolkitClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog API interface
#[derive(Clone)]
pub struct CatalogApi {
    client: AppToolkitClient,
}

impl CatalogApi {
    /// Create a new catalog API interface
    pub(crate) fn new(client: AppToolkitClient) -> Self {
        Self { client }
    }

    /// Fetch the catalog document and report how long the request took
    ///
    /// GET {base_url}/{channel}/{language}/home/api_android_apps.json
    pub async fn fetch_timed(&self) -> ApiResult<(CatalogResponse, Duration)> {
        let path = self.client.config().catalog_path();
        self.client.timed_get(&path).await
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Catalog document root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Payload wrapper
    pub data: CatalogData,
}

/// Catalog payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    /// Published apps, in catalog order
    pub apps: Vec<AppDto>,
}

/// One app as published in the catalog
///
/// URLs are carried verbatim; trimming and validation happen when the
/// entry is mapped to the domain model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDto {
    /// Display name
    pub name: String,
    /// Android package identifier
    pub package_name: String,
    /// Icon URL; absent and `null` are both accepted
    #[serde(default)]
    pub icon_logo: Option<String>,
    /// Store category
    #[serde(default)]
    pub category: Option<CategoryDto>,
    /// Short description
    #[serde(default)]
    pub description: Option<String>,
    /// Screenshots with their aspect ratios
    #[serde(default)]
    pub screenshots: Option<Vec<ScreenshotDto>>,
}

/// Store category of an app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    /// Display label
    pub label: String,
    /// Stable identifier, published in snake case
    pub category_id: String,
}

/// Screenshot reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotDto {
    /// Image URL
    #[serde(default)]
    pub url: Option<String>,
    /// Aspect ratio such as `9:16`
    #[serde(default)]
    pub aspect_ratio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Channel, ClientConfig};
    use httpmock::prelude::*;

    const SAMPLE: &str = r#"{
        "data": {
            "apps": [
                {
                    "name": "Cleaner for Android",
                    "packageName": "com.example.cleaner",
                    "iconLogo": " https://cdn.example.com/cleaner.png ",
                    "category": { "label": "Tools", "category_id": "tools" },
                    "description": "Frees up space",
                    "screenshots": [
                        { "url": "https://cdn.example.com/c1.png", "aspectRatio": "9:16" },
                        { "aspectRatio": "16:9" }
                    ]
                },
                {
                    "name": "Music Sleep Timer",
                    "packageName": "com.example.timer",
                    "iconLogo": ""
                }
            ]
        }
    }"#;

    #[test]
    fn test_catalog_deserialize() {
        let response: CatalogResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.data.apps.len(), 2);

        let cleaner = &response.data.apps[0];
        assert_eq!(cleaner.package_name, "com.example.cleaner");
        assert_eq!(cleaner.category.as_ref().unwrap().category_id, "tools");
        let screenshots = cleaner.screenshots.as_ref().unwrap();
        assert_eq!(screenshots[0].aspect_ratio.as_deref(), Some("9:16"));
        assert!(screenshots[1].url.is_none());

        let timer = &response.data.apps[1];
        assert_eq!(timer.icon_logo.as_deref(), Some(""));
        assert!(timer.category.is_none());
        assert!(timer.description.is_none());
        assert!(timer.screenshots.is_none());
    }

    #[test]
    fn test_null_or_absent_icon_keeps_the_entry() {
        let document = r#"{
            "data": {
                "apps": [
                    { "name": "Notes", "packageName": "com.example.notes", "iconLogo": null },
                    { "name": "Timer", "packageName": "com.example.timer" },
                    { "name": "Clock", "packageName": "com.example.clock", "iconLogo": "https://cdn.example.com/c.png" }
                ]
            }
        }"#;

        let response: CatalogResponse = serde_json::from_str(document).unwrap();
        let icons: Vec<_> = response.data.apps.iter().map(|a| a.icon_logo.as_deref()).collect();
        assert_eq!(icons, vec![None, None, Some("https://cdn.example.com/c.png")]);
    }

    #[test]
    fn test_missing_apps_is_an_error() {
        let result = serde_json::from_str::<CatalogResponse>(r#"{ "data": {} }"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_uses_channel_and_language() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/debug/fr/home/api_android_apps.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(SAMPLE);
            })
            .await;

        let config = ClientConfig::default()
            .with_base_url(server.base_url())
            .with_channel(Channel::Debug)
            .with_language("fr");
        let client = AppToolkitClient::with_config(config).unwrap();

        let (response, elapsed) = client.catalog().fetch_timed().await.unwrap();
        assert_eq!(response.data.apps.len(), 2);
        assert!(elapsed > Duration::ZERO);
        mock.assert_async().await;
    }
}

//! Domain model

use serde::{Deserialize, Serialize};

/// Store listing prefix used to launch or share an app
const PLAY_STORE_URL: &str = "https://play.google.com/store/apps/details?id=";

/// Store category of an app
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppCategory {
    /// Stable category identifier
    pub id: String,
    /// Display label
    pub label: String,
}

/// One app from the catalog, sanitized for display
///
/// `package_name` is the unique key within a catalog. URLs are trimmed and
/// guaranteed to be absolute http(s) URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppInfo {
    /// Display name
    pub name: String,
    /// Android package identifier
    pub package_name: String,
    /// Icon URL, `None` when the catalog has no usable icon
    pub icon_url: Option<String>,
    /// Short description, empty when the catalog has none
    pub description: String,
    /// Portrait screenshot URLs in catalog order
    pub screenshots: Vec<String>,
    /// Store category
    pub category: Option<AppCategory>,
}

impl AppInfo {
    /// Create an app with only a name and package identifier
    pub fn new(name: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            icon_url: None,
            description: String::new(),
            screenshots: Vec::new(),
            category: None,
        }
    }
}

/// Store listing URL for a package identifier
#[must_use]
pub fn play_store_url(package_name: &str) -> String {
    format!("{PLAY_STORE_URL}{package_name}")
}

/// Entry of a displayed app list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppListItem {
    /// An app from the catalog
    App(AppInfo),
    /// Ad placeholder
    Ad,
}

impl AppListItem {
    /// Whether this is an ad placeholder
    #[must_use]
    pub fn is_ad(&self) -> bool {
        matches!(self, Self::Ad)
    }

    /// The app this item shows, `None` for ads
    #[must_use]
    pub fn app(&self) -> Option<&AppInfo> {
        match self {
            Self::App(app) => Some(app),
            Self::Ad => None,
        }
    }
}

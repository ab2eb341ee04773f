//! Wire-to-domain mapping
//!
//! Catalog documents are hand-edited, so every URL is trimmed and checked
//! before it reaches the domain model.

use crate::model::{AppCategory, AppInfo};
use apptoolkit_api_client::endpoints::catalog::{AppDto, CatalogResponse, CategoryDto, ScreenshotDto};
use std::collections::HashSet;
use tracing::warn;

/// Aspect ratio of the screenshots shown on an app card
pub const PORTRAIT_ASPECT_RATIO: &str = "9:16";

/// Trim a URL and reject anything that is not an absolute http(s) URL
#[must_use]
pub fn sanitize_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return None;
    }
    Some(url.to_string())
}

/// Map one catalog entry onto the domain model
#[must_use]
pub fn to_domain(dto: AppDto) -> AppInfo {
    AppInfo {
        name: dto.name.trim().to_string(),
        package_name: dto.package_name.trim().to_string(),
        icon_url: dto.icon_logo.as_deref().and_then(sanitize_url),
        description: dto.description.map(|d| d.trim().to_string()).unwrap_or_default(),
        screenshots: portrait_screenshots(dto.screenshots.unwrap_or_default()),
        category: dto.category.and_then(to_category),
    }
}

/// Keep only portrait screenshots with a usable URL, in catalog order
fn portrait_screenshots(screenshots: Vec<ScreenshotDto>) -> Vec<String> {
    screenshots
        .into_iter()
        .filter(|s| s.aspect_ratio.as_deref() == Some(PORTRAIT_ASPECT_RATIO))
        .filter_map(|s| s.url.as_deref().and_then(sanitize_url))
        .collect()
}

fn to_category(dto: CategoryDto) -> Option<AppCategory> {
    let id = dto.category_id.trim();
    let label = dto.label.trim();
    if id.is_empty() && label.is_empty() {
        return None;
    }
    Some(AppCategory {
        id: id.to_string(),
        label: label.to_string(),
    })
}

/// Map a whole catalog document
///
/// Entries without a package identifier are dropped, as are later entries
/// repeating an identifier already seen. Catalog order is preserved.
#[must_use]
pub fn map_catalog(response: CatalogResponse) -> Vec<AppInfo> {
    let mut seen = HashSet::new();

    response
        .data
        .apps
        .into_iter()
        .map(to_domain)
        .filter(|app| {
            if app.package_name.is_empty() {
                warn!(name = %app.name, "Dropping catalog entry without package name");
                return false;
            }
            if !seen.insert(app.package_name.clone()) {
                warn!(package = %app.package_name, "Dropping duplicate catalog entry");
                return false;
            }
            true
        })
        .collect()
}

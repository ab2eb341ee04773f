//! Ad placeholder interleaving

use crate::model::{AppInfo, AppListItem};

/// Build the displayed list for `apps`
///
/// With ads enabled and a positive `frequency`, an [`AppListItem::Ad`]
/// follows every complete group of `frequency` apps, the last group
/// included. A trailing group shorter than `frequency` gets no ad.
/// Otherwise the result holds exactly one [`AppListItem::App`] per input.
#[must_use]
pub fn build_list_items(apps: &[AppInfo], ads_enabled: bool, frequency: i32) -> Vec<AppListItem> {
    let every = match usize::try_from(frequency) {
        Ok(n) if ads_enabled && n > 0 => n,
        _ => return apps.iter().cloned().map(AppListItem::App).collect(),
    };

    let mut items = Vec::with_capacity(apps.len() + apps.len() / every);
    for (index, app) in apps.iter().enumerate() {
        items.push(AppListItem::App(app.clone()));
        if (index + 1) % every == 0 {
            items.push(AppListItem::Ad);
        }
    }
    items
}

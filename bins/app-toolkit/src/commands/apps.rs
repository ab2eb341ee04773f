//! List catalog apps

use super::first_settled;
use crate::context::AppContext;
use crate::exit_code;
use anyhow::{bail, Result};
use apptoolkit_catalog::{AppsView, DataState, FavoritesRepository};
use apptoolkit_cli::output::{format_count, print_list_items, Status};
use apptoolkit_cli::progress;
use apptoolkit_core::error::exit_codes;
use std::process::ExitCode;

/// Fetch the catalog and print it with ad placeholders
pub async fn run(ctx: &AppContext, favorites_only: bool, no_ads: bool, frequency: Option<i32>) -> Result<ExitCode> {
    let view = if favorites_only { AppsView::Favorites } else { AppsView::All };
    let frequency = ctx.ad_frequency(no_ads, frequency);
    let listings = ctx.listings()?;

    let spinner = (!ctx.json()).then(|| progress::spinner("Loading catalog..."));
    let state = first_settled(listings.observe_list_items(view, frequency)).await;

    let Some(state) = state else {
        bail!("Catalog stream ended before loading finished");
    };

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    match state {
        DataState::Success(items) => {
            let app_count = items.iter().filter(|i| !i.is_ad()).count();
            if let Some(ref pb) = spinner {
                progress::finish_success(pb, &format!("Loaded {}", format_count(app_count, "app", "apps")));
            }
            if !ctx.json() {
                if items.is_empty() {
                    Status::info("No apps to show");
                } else {
                    print_list_items(&items, &listings.favorites().favorites());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        DataState::Error(kind) => {
            if let Some(ref pb) = spinner {
                progress::finish_error(pb, kind.message());
            }
            if !ctx.json() {
                Status::error(kind.message());
            }
            Ok(exit_code(exit_codes::NETWORK_ERROR))
        }
        DataState::Loading(_) => bail!("Catalog is still loading"),
    }
}

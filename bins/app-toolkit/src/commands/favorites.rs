//! List favorite apps

use super::first_settled;
use crate::context::AppContext;
use crate::exit_code;
use anyhow::{bail, Result};
use apptoolkit_catalog::{DataState, FavoritesRepository};
use apptoolkit_cli::output::{app_row, format_count, Status};
use apptoolkit_core::error::exit_codes;
use std::process::ExitCode;

/// Print favorites, resolved against the catalog unless `offline`
pub async fn run(ctx: &AppContext, offline: bool) -> Result<ExitCode> {
    if offline {
        let stored = ctx.preferences.favorites();
        if ctx.json() {
            println!("{}", serde_json::to_string_pretty(&stored)?);
        } else if stored.is_empty() {
            Status::info("No favorites yet");
        } else {
            for package in &stored {
                println!("★ {package}");
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let listings = ctx.listings()?;
    let Some(state) = first_settled(listings.observe_favorite_apps()).await else {
        bail!("Favorites stream ended before loading finished");
    };

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    match state {
        DataState::Success(apps) => {
            if !ctx.json() {
                if apps.is_empty() {
                    Status::info("No favorites in the current catalog");
                } else {
                    Status::header(&format_count(apps.len(), "favorite", "favorites"));
                    for app in &apps {
                        println!("{}", app_row(app, true));
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        DataState::Error(kind) => {
            if !ctx.json() {
                Status::error(kind.message());
            }
            Ok(exit_code(exit_codes::NETWORK_ERROR))
        }
        DataState::Loading(_) => bail!("Catalog is still loading"),
    }
}

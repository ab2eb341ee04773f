//! Toggle a favorite

use crate::context::AppContext;
use anyhow::Result;
use apptoolkit_catalog::FavoritesRepository;
use apptoolkit_cli::output::Status;
use std::process::ExitCode;

/// Add `package` to favorites, or remove it if already present
pub async fn run(ctx: &AppContext, package: &str) -> Result<ExitCode> {
    let is_favorite = ctx.preferences.toggle_favorite(package).await?;

    if ctx.json() {
        let output = serde_json::json!({
            "package": package.trim(),
            "favorite": is_favorite,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if is_favorite {
        Status::success(&format!("Added {} to favorites", package.trim()));
    } else {
        Status::success(&format!("Removed {} from favorites", package.trim()));
    }

    Ok(ExitCode::SUCCESS)
}

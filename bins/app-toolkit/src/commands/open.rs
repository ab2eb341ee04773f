//! Store link for an app

use crate::context::AppContext;
use anyhow::Result;
use apptoolkit_catalog::model::play_store_url;
use apptoolkit_core::Error;
use std::process::ExitCode;

/// Print the store listing URL for `package`
pub fn run(ctx: &AppContext, package: &str) -> Result<ExitCode> {
    let package = package.trim();
    if package.is_empty() {
        return Err(Error::validation("Package identifier cannot be empty").into());
    }

    let url = play_store_url(package);
    if ctx.json() {
        let output = serde_json::json!({ "package": package, "url": url });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{url}");
    }

    Ok(ExitCode::SUCCESS)
}

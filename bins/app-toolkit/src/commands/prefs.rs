//! Show or change local preferences

use crate::context::AppContext;
use anyhow::Result;
use apptoolkit_cli::output::Status;
use apptoolkit_core::preferences::Theme;
use owo_colors::OwoColorize;
use std::process::ExitCode;

/// Apply any requested changes, then print the preferences
pub async fn run(
    ctx: &AppContext,
    ads: Option<bool>,
    theme: Option<&str>,
    onboarding_complete: Option<bool>,
) -> Result<ExitCode> {
    let theme = theme.map(str::parse::<Theme>).transpose()?;
    let changed = ads.is_some() || theme.is_some() || onboarding_complete.is_some();

    let prefs = if changed {
        let (_, prefs) = ctx
            .preferences
            .update(move |p| {
                if let Some(enabled) = ads {
                    p.ads_enabled = enabled;
                }
                if let Some(theme) = theme {
                    p.theme = theme;
                }
                if let Some(done) = onboarding_complete {
                    p.onboarding_complete = done;
                }
            })
            .await?;
        prefs
    } else {
        ctx.preferences.snapshot()
    };

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
        return Ok(ExitCode::SUCCESS);
    }

    if changed {
        Status::success("Preferences updated");
    }
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    println!("{:<22}{}", "ads".bold(), on_off(prefs.ads_enabled));
    println!("{:<22}{}", "theme".bold(), prefs.theme);
    println!("{:<22}{}", "onboarding complete".bold(), prefs.onboarding_complete);
    println!("{:<22}{}", "favorites".bold(), prefs.favorites.len());
    if let Some(path) = ctx.store.path() {
        println!("{:<22}{}", "stored in".bold(), path.display().dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

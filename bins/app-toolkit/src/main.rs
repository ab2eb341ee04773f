//! App Toolkit CLI
//!
//! Lists the developer's apps from the remote catalog, manages favorites and
//! local preferences, and prints store links for launching an app.

use apptoolkit_cli::output::Status;
use apptoolkit_core::config::Config;
use apptoolkit_core::error::exit_codes;
use apptoolkit_telemetry::TelemetryConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;

use commands::{apps, favorites, open, prefs, toggle};
use context::AppContext;

/// Browse, favorite and open apps from the App Toolkit catalog
#[derive(Parser)]
#[command(name = "app-toolkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Configuration file (defaults to app-toolkit.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog host, overriding the configuration file
    #[arg(long, global = true, env = "APP_TOOLKIT_API_URL")]
    api_url: Option<String>,

    /// Directory for local preferences, overriding the configuration file
    #[arg(long, global = true, env = "APP_TOOLKIT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Print collected metrics to stderr on exit
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog apps with ad placeholders
    Apps {
        /// Only list favorites
        #[arg(long)]
        favorites: bool,

        /// Hide ad placeholders regardless of preferences
        #[arg(long)]
        no_ads: bool,

        /// Apps between ad placeholders (defaults to the configured value)
        #[arg(long, allow_hyphen_values = true)]
        frequency: Option<i32>,
    },

    /// List favorite apps
    Favorites {
        /// Print stored package identifiers without fetching the catalog
        #[arg(long)]
        offline: bool,
    },

    /// Add or remove a favorite
    Toggle {
        /// Package identifier, e.g. com.example.notes
        package: String,
    },

    /// Print the store link used to launch or share an app
    Open {
        /// Package identifier, e.g. com.example.notes
        package: String,
    },

    /// Show or change local preferences
    Prefs {
        /// Show ad placeholders (on/off)
        #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
        ads: Option<bool>,

        /// Theme: system, light or dark
        #[arg(long)]
        theme: Option<String>,

        /// Mark onboarding as completed (true/false)
        #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
        onboarding_complete: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::error_report(&e);
            return exit_code(exit_codes::CONFIG_ERROR);
        }
    };
    if let Some(ref url) = cli.api_url {
        config.schema.api.base_url = Some(url.clone());
    }
    if let Some(ref dir) = cli.data_dir {
        config.schema.storage.data_dir = Some(dir.clone());
    }

    let level = if cli.verbose {
        "app_toolkit=debug,apptoolkit_catalog=debug,apptoolkit_api_client=debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    let telemetry = TelemetryConfig::default()
        .with_log_level(level)
        .with_json(cli.format == OutputFormat::Json);
    if let Err(e) = apptoolkit_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {e}"));
    }

    let ctx = match AppContext::build(config, cli.format) {
        Ok(ctx) => ctx,
        Err(e) => {
            Status::error_report(&e);
            return exit_code(e.exit_code());
        }
    };

    let result = match cli.command {
        Commands::Apps {
            favorites,
            no_ads,
            frequency,
        } => apps::run(&ctx, favorites, no_ads, frequency).await,
        Commands::Favorites { offline } => favorites::run(&ctx, offline).await,
        Commands::Toggle { package } => toggle::run(&ctx, &package).await,
        Commands::Open { package } => open::run(&ctx, &package),
        Commands::Prefs {
            ads,
            theme,
            onboarding_complete,
        } => prefs::run(&ctx, ads, theme.as_deref(), onboarding_complete).await,
    };

    if cli.metrics {
        eprintln!("{:#}", apptoolkit_telemetry::metrics().export_json());
    }

    match result {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<apptoolkit_core::Error>() {
                Some(core) => {
                    Status::error_report(core);
                    exit_code(core.exit_code())
                }
                None => {
                    Status::error(&format!("{e:#}"));
                    exit_code(exit_codes::FAILURE)
                }
            }
        }
    }
}

/// Convert one of the shared exit codes
pub(crate) fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

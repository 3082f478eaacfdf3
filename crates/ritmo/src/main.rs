// SPDX-FileCopyrightText: 2026 Ritmo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ritmo - marketing operations console for agency teams.
//!
//! This is the binary entry point. Every view of the console is a
//! subcommand; the modules below hold one command each.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod analytics;
mod approvals;
mod brand;
mod calendar;
mod campaigns;
mod clients;
mod dashboard;
mod doctor;
mod generation;
mod settings;
mod status;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ritmo_config::model::RitmoConfig;
use ritmo_core::RitmoError;

/// Ritmo - marketing operations console for agency teams.
#[derive(Parser, Debug)]
#[command(name = "ritmo", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit structured JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Portfolio overview: counts, clients and pending approvals.
    Dashboard,
    /// Manage client accounts.
    Clients {
        #[command(subcommand)]
        action: clients::ClientsAction,
    },
    /// Brand DNA operations for one client.
    Brand {
        #[command(subcommand)]
        action: brand::BrandAction,
    },
    /// List and launch campaigns.
    Campaigns {
        #[command(subcommand)]
        action: campaigns::CampaignsAction,
    },
    /// Month grid of scheduled posts, plus calendar generation.
    Calendar(calendar::CalendarArgs),
    /// Approval queue: list items and record verdicts.
    Approvals {
        #[command(subcommand)]
        action: approvals::ApprovalsAction,
    },
    /// Aggregated campaign and publication metrics.
    Analytics(analytics::AnalyticsArgs),
    /// Operator profile, preferences and the specialists roster.
    Settings {
        #[command(subcommand)]
        action: settings::SettingsAction,
    },
    /// Backend connectivity at a glance.
    Status,
    /// Diagnostic checks against the environment.
    Doctor {
        /// Run additional intensive checks.
        #[arg(long)]
        deep: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let plain = cli.plain;

    let config = match &cli.config {
        Some(path) => ritmo_config::load_and_validate_path(path),
        None => ritmo_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            ritmo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log);

    if let Err(e) = run(cli, config).await {
        if !plain && std::io::stderr().is_terminal() {
            use colored::Colorize;
            eprintln!("{}: {e}", "error".red());
        } else {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: RitmoConfig) -> Result<(), RitmoError> {
    let json = cli.json;
    let plain = cli.plain;

    match cli.command {
        Some(Commands::Dashboard) => dashboard::run_dashboard(&config, json, plain).await,
        Some(Commands::Clients { action }) => {
            clients::run_clients(&config, action, json, plain).await
        }
        Some(Commands::Brand { action }) => brand::run_brand(&config, action, json, plain).await,
        Some(Commands::Campaigns { action }) => {
            campaigns::run_campaigns(&config, action, json, plain).await
        }
        Some(Commands::Calendar(args)) => calendar::run_calendar(&config, args, json, plain).await,
        Some(Commands::Approvals { action }) => {
            approvals::run_approvals(&config, action, json, plain).await
        }
        Some(Commands::Analytics(args)) => {
            analytics::run_analytics(&config, args, json, plain).await
        }
        Some(Commands::Settings { action }) => {
            settings::run_settings(&config, action, json, plain).await
        }
        Some(Commands::Status) => status::run_status(&config, json, plain).await,
        Some(Commands::Doctor { deep }) => doctor::run_doctor(&config, deep, plain).await,
        None => {
            println!("ritmo: use --help for available commands");
            Ok(())
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured
/// level; the configured format picks compact or JSON lines.
fn init_tracing(log: &ritmo_config::model::LogConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ritmo={},warn", log.level)));

    if log.format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_names(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_names(false)
            .init();
    }
}

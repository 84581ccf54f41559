//! livehub CLI - terminal fan dashboard for motorsport drivers and events
//!
//! Entry point for the `livehub` binary:
//! - `tui` (default): full-screen dashboard with directory, profile and schedule
//! - `drivers`, `driver`, `schedule`: one-shot listings for scripts and pipes
//! - `config`: inspect the resolved API base URL

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use livehub_core::{Api, HubConfig};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;
mod tui;

use tracing_setup::{LogTarget, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "livehub",
    author,
    version,
    about = "Live driver profiles, upcoming Grands Prix and race results in your terminal",
    long_about = "Browse drivers, their career stats and 3D scene links, and the race \
                  schedule served by the F1 Live Hub API. Runs the dashboard when no \
                  subcommand is given."
)]
struct Cli {
    /// API base URL (overrides ~/.livehub/config.toml)
    #[arg(long, global = true, env = "LIVEHUB_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive dashboard (default)
    Tui,
    /// List drivers, optionally filtered
    Drivers(commands::drivers::DriversArgs),
    /// Show one driver's profile and stats
    Driver(commands::drivers::DriverArgs),
    /// Show upcoming Grands Prix or recent results
    Schedule(commands::schedule::ScheduleArgs),
    /// Inspect livehub configuration (show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads LIVEHUB_API_URL
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let target = match command {
        Commands::Tui => LogTarget::File(HubConfig::log_dir()),
        _ => LogTarget::Stderr,
    };
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        target,
    })
    .ok();

    let override_url = cli.api_url.as_deref();
    match command {
        Commands::Tui => {
            let (hub, api) = connect(override_url)?;
            info!(api = %hub.api_base(), "starting dashboard");
            tui::run(api, &hub)?
        }
        Commands::Drivers(args) => commands::run_drivers(connect(override_url)?.1, args).await?,
        Commands::Driver(args) => commands::run_driver(connect(override_url)?.1, args).await?,
        Commands::Schedule(args) => commands::run_schedule(connect(override_url)?.1, args).await?,
        Commands::Config(args) => config::run_config(args, override_url)?,
    }
    Ok(())
}

/// Resolve the API base once and build the shared client
fn connect(override_url: Option<&str>) -> Result<(HubConfig, Api)> {
    let hub = HubConfig::resolve(override_url).context("Failed to resolve API base URL")?;
    debug!(api = %hub.api_base(), source = %hub.source(), "resolved configuration");
    let api = Api::http(&hub).context("Failed to build API client")?;
    Ok((hub, api))
}

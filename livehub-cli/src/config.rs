use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use livehub_core::HubConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved API base URL and where it came from
    Show,
    /// Show config file path
    Path,
}

pub fn run_config(args: ConfigArgs, override_url: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(override_url),
        ConfigCommands::Path => run_path(),
    }
}

fn run_show(override_url: Option<&str>) -> Result<()> {
    let hub = HubConfig::resolve(override_url).context("Failed to resolve API base URL")?;
    let path = HubConfig::config_path();

    println!("┌─ livehub configuration");
    println!("├─ api.base_url: {}", hub.api_base());
    println!("├─ source:       {}", hub.source());
    println!(
        "└─ config file:  {}{}",
        path.display(),
        if path.exists() { "" } else { " (not found)" }
    );
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", HubConfig::config_path().display());
    Ok(())
}

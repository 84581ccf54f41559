//! `livehub drivers` and `livehub driver <ID>`

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use livehub_core::{
    Api, Driver, DriverDirectory, DriverProfile, LinkRenderer, ProfileTab, SceneView, TabSet,
};
use serde_json::json;
use tracing::debug;

use super::{branch, ensure_ready};

#[derive(Parser, Debug)]
pub struct DriversArgs {
    /// Search query matched against name, team, country and number
    #[arg(long, short)]
    pub query: Option<String>,

    /// Output as JSON (for piping to jq)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct DriverArgs {
    /// Driver ID as served by the API
    pub id: String,

    /// Output as JSON (for piping to jq)
    #[arg(long)]
    pub json: bool,
}

pub async fn run_drivers(api: Api, args: DriversArgs) -> Result<()> {
    let mut directory = DriverDirectory::new(api);
    directory.mount();
    directory.settle().await;
    ensure_ready(directory.status())?;

    if let Some(query) = args.query {
        directory.set_query(query);
    }
    let visible = directory.visible();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if directory.filter().is_active() {
        println!(
            "┌─ Filter: '{}' ({} of {} drivers)",
            directory.filter().query(),
            visible.len(),
            directory.drivers().len()
        );
    } else {
        println!("┌─ {} drivers", visible.len());
    }
    println!("│");

    if visible.is_empty() {
        println!("└─ (no drivers match)");
        return Ok(());
    }

    for (i, driver) in visible.iter().enumerate() {
        let (prefix, _) = branch(i, visible.len());
        println!("{} {}", prefix, driver_row(driver));
    }
    Ok(())
}

pub async fn run_driver(api: Api, args: DriverArgs) -> Result<()> {
    // Name, team and number only come from the listing
    let mut directory = DriverDirectory::new(api.clone());
    directory.mount();
    directory.settle().await;
    let driver = match directory.drivers().iter().find(|d| d.id == args.id) {
        Some(driver) => driver.clone(),
        None => {
            debug!(id = %args.id, "driver not in listing, showing detail only");
            Driver::from_id(args.id.as_str())
        }
    };

    let mut profile = DriverProfile::new(api, Arc::new(LinkRenderer));
    profile.show(driver);
    profile.settle().await;
    // The summary is printed even when the detail failed; the error follows
    let loaded = ensure_ready(profile.status());

    if args.json {
        let value = json!({
            "driver": profile.driver(),
            "detail": profile.detail(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return loaded;
    }

    let mut scenes = Vec::new();
    for tab in ProfileTab::ALL {
        profile.tabs_mut().set_tab(*tab);
        scenes.push((tab.label(), profile.scene()));
    }

    let name = profile.driver().map(Driver::display_name).unwrap_or_default();
    println!("┌─ {}", name);
    println!("│  {}", profile.subtitle());
    println!("│");
    for stat in profile.stats() {
        println!("├─ {:<12} {}", stat.label, stat.value);
    }
    println!("│");
    for (i, (label, scene)) in scenes.iter().enumerate() {
        let (prefix, _) = branch(i, scenes.len());
        println!("{} {:<12} {}", prefix, label, scene_text(scene));
    }
    loaded
}

fn driver_row(driver: &Driver) -> String {
    format!(
        "{:<4} {}  ·  {}  ·  {}  [{}]",
        driver.number_badge().unwrap_or_default(),
        driver.display_name(),
        driver.display_team(),
        driver.display_country(),
        driver.id
    )
}

fn scene_text(scene: &SceneView) -> &str {
    match scene {
        SceneView::Embedded { url } => url,
        SceneView::Unavailable { label } => label,
    }
}

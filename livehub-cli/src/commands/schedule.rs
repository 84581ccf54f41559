//! `livehub schedule [--recent]`

use anyhow::Result;
use clap::Parser;
use livehub_core::views::schedule::SCHEDULE_EMPTY;
use livehub_core::{Api, Schedule, ScheduleTab, TabSet};

use super::{branch, ensure_ready};

#[derive(Parser, Debug)]
pub struct ScheduleArgs {
    /// Show recent results instead of upcoming events
    #[arg(long)]
    pub recent: bool,

    /// Output as JSON (for piping to jq)
    #[arg(long)]
    pub json: bool,
}

pub async fn run_schedule(api: Api, args: ScheduleArgs) -> Result<()> {
    let mut schedule = Schedule::new(api);
    if args.recent {
        schedule.tabs_mut().set_tab(ScheduleTab::Recent);
    }
    schedule.mount();
    schedule.settle().await;
    ensure_ready(schedule.status())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(schedule.visible())?);
        return Ok(());
    }

    println!("┌─ {}", schedule.tabs().active().label());
    println!("│");

    if schedule.is_empty() {
        println!("└─ {}", SCHEDULE_EMPTY);
        return Ok(());
    }

    let cards = schedule.cards();
    for (i, card) in cards.iter().enumerate() {
        let (prefix, cont) = branch(i, cards.len());
        println!("{} {}  ({})", prefix, card.name, card.round);
        println!("{}{}  ·  {}", cont, card.dates, card.location);
        if let Some((winner, time)) = &card.result {
            println!("{}Winner: {}  ·  {}", cont, winner, time);
        }
        if i + 1 < cards.len() {
            println!("│");
        }
    }
    Ok(())
}

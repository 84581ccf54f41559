//! One-shot commands for the livehub CLI
//!
//! Each command mounts the same headless view the dashboard uses, waits for
//! it to settle and prints the result once.

pub mod drivers;
pub mod schedule;

use anyhow::{bail, Result};
use livehub_core::ViewStatus;

// Re-export main dispatcher functions for flat access from main.rs
pub use drivers::{run_driver, run_drivers};
pub use schedule::run_schedule;

/// Fail with the view's user-facing message unless it finished loading
fn ensure_ready(status: ViewStatus<'_>) -> Result<()> {
    match status {
        ViewStatus::Ready => Ok(()),
        ViewStatus::Failed(message) => bail!("{}", message),
        ViewStatus::Loading(text) => bail!("{} (still pending)", text),
        ViewStatus::Idle => bail!("Nothing was loaded"),
    }
}

/// Tree prefix and continuation indent for row `index` of `len`
fn branch(index: usize, len: usize) -> (&'static str, &'static str) {
    if index + 1 == len {
        ("└─", "   ")
    } else {
        ("├─", "│  ")
    }
}

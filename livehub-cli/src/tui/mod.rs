//! livehub TUI - full-screen fan dashboard
//!
//! - Hero banner with the 3D scene link
//! - Driver directory with live search
//! - Driver profile (stats, Driver 3D / Car 3D tabs) for the selected driver
//! - Schedule with Upcoming / Results tabs
//!
//! Requests run as tokio tasks; the draw loop polls their results every tick.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::{App, Mode, Pane};
pub use terminal::run;

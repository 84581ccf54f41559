//! Headless views
//!
//! Each view owns its own fetch controller and local UI state. Frontends
//! (the TUI, the one-shot commands) only read from them and forward input.

pub mod directory;
pub mod hero;
pub mod profile;
pub mod schedule;

pub use directory::DriverDirectory;
pub use hero::Hero;
pub use profile::{DriverProfile, StatLine};
pub use schedule::{EventCard, Schedule};

/// What a data-backed view should render right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus<'a> {
    /// Not mounted yet
    Idle,
    /// Request in flight; carries the view's loading text
    Loading(&'static str),
    /// Last request failed; carries the user-facing message
    Failed(&'a str),
    Ready,
}

impl ViewStatus<'_> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready)
    }
}

pub(crate) fn status_of<'a, K, T>(
    fetch: &'a crate::fetch::FetchController<K, T>,
    loading_text: &'static str,
) -> ViewStatus<'a>
where
    K: PartialEq + std::fmt::Debug,
    T: Send + 'static,
{
    if fetch.is_loading() {
        ViewStatus::Loading(loading_text)
    } else if let Some(message) = fetch.error() {
        ViewStatus::Failed(message)
    } else if fetch.data().is_some() {
        ViewStatus::Ready
    } else {
        ViewStatus::Idle
    }
}

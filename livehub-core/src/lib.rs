//! Core of the livehub motorsport fan dashboard
//!
//! - `api`: typed client for the dashboard backend (`/drivers`, `/events/*`)
//! - `fetch`: per-view fetch lifecycle with stale-response protection
//! - `filter`, `tabs`, `selection`: the small pieces of local UI state
//! - `views`: headless hero, directory, profile and schedule views
//! - `dashboard`: everything wired together behind one selection

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod model;
pub mod normalize;
pub mod scene;
pub mod selection;
pub mod tabs;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{Api, Endpoint, Fetcher, HttpFetcher};
pub use config::{ConfigSource, HubConfig};
pub use dashboard::Dashboard;
pub use error::{ConfigError, FetchError, FetchResult};
pub use fetch::{FetchController, FetchState};
pub use filter::{filter, FilterState, Searchable};
pub use model::{Driver, DriverDetail, DriverStats, Event, EventLists, RaceResult};
pub use normalize::normalize_list;
pub use scene::{LinkRenderer, SceneRenderer, SceneView};
pub use selection::{Selection, SelectionChange};
pub use tabs::{ProfileTab, ScheduleTab, TabSet, TabbedPanel};
pub use views::{DriverDirectory, DriverProfile, Hero, Schedule, ViewStatus};

//! Grand Prix schedule: upcoming weekends and recent results
//!
//! Both lists are fetched together on mount; the tab only picks which one
//! is shown.

use crate::api::Api;
use crate::fetch::FetchController;
use crate::format::format_date_range;
use crate::model::{Event, EventLists};
use crate::tabs::{ScheduleTab, TabbedPanel};

use super::{status_of, ViewStatus};

pub const SCHEDULE_LOADING: &str = "Loading schedule…";
pub const SCHEDULE_ERROR: &str = "Unable to load schedule right now.";
pub const SCHEDULE_EMPTY: &str = "No data available.";

/// Display-ready event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub name: String,
    pub round: String,
    pub dates: String,
    pub location: String,
    /// Winner and time; only on the results tab
    pub result: Option<(String, String)>,
}

pub struct Schedule {
    api: Api,
    fetch: FetchController<(), EventLists>,
    tabs: TabbedPanel<ScheduleTab>,
}

impl Schedule {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            fetch: FetchController::new("schedule", SCHEDULE_ERROR),
            tabs: TabbedPanel::new(),
        }
    }

    pub fn mount(&mut self) {
        let api = self.api.clone();
        self.fetch
            .observe((), move |_| async move { api.schedule().await });
    }

    pub fn unmount(&mut self) {
        self.fetch.teardown();
    }

    pub fn reload(&mut self) {
        self.unmount();
        self.mount();
    }

    pub fn poll(&mut self) -> bool {
        self.fetch.poll()
    }

    pub async fn settle(&mut self) {
        self.fetch.settle().await
    }

    pub fn status(&self) -> ViewStatus<'_> {
        status_of(&self.fetch, SCHEDULE_LOADING)
    }

    pub fn tabs(&self) -> &TabbedPanel<ScheduleTab> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabbedPanel<ScheduleTab> {
        &mut self.tabs
    }

    /// Events for the active tab
    pub fn visible(&self) -> &[Event] {
        let Some(lists) = self.fetch.data() else {
            return &[];
        };
        match self.tabs.active() {
            ScheduleTab::Upcoming => &lists.upcoming,
            ScheduleTab::Recent => &lists.recent,
        }
    }

    /// True once loaded with nothing to show on the active tab
    pub fn is_empty(&self) -> bool {
        self.status().is_ready() && self.visible().is_empty()
    }

    pub fn cards(&self) -> Vec<EventCard> {
        let show_results = self.tabs.is_active(ScheduleTab::Recent);
        self.visible()
            .iter()
            .map(|event| EventCard {
                name: event.display_name().to_string(),
                round: format!("Round {}", event.display_round()),
                dates: format_date_range(event.start_date.as_deref(), event.end_date.as_deref()),
                location: event.display_location().to_string(),
                result: event.result.as_ref().filter(|_| show_results).map(|r| {
                    (r.display_winner().to_string(), r.display_time().to_string())
                }),
            })
            .collect()
    }
}

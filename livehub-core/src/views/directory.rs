//! Searchable driver directory backed by `GET /drivers`

use crate::api::Api;
use crate::fetch::FetchController;
use crate::filter::FilterState;
use crate::model::Driver;

use super::{status_of, ViewStatus};

pub const DRIVERS_LOADING: &str = "Loading drivers…";
pub const DRIVERS_ERROR: &str = "Unable to load drivers right now.";
pub const SEARCH_PLACEHOLDER: &str = "Search by name, team, or number";

pub struct DriverDirectory {
    api: Api,
    fetch: FetchController<(), Vec<Driver>>,
    filter: FilterState,
}

impl DriverDirectory {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            fetch: FetchController::new("drivers", DRIVERS_ERROR),
            filter: FilterState::new(),
        }
    }

    /// Start loading the list (no-op while already mounted)
    pub fn mount(&mut self) {
        let api = self.api.clone();
        self.fetch
            .observe((), move |_| async move { api.drivers().await });
    }

    pub fn unmount(&mut self) {
        self.fetch.teardown();
    }

    /// Tear down and mount again
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
        status_of(&self.fetch, DRIVERS_LOADING)
    }

    /// Every loaded driver, unfiltered
    pub fn drivers(&self) -> &[Driver] {
        self.fetch.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Drivers matching the current query, in API order
    pub fn visible(&self) -> Vec<&Driver> {
        self.filter.apply(self.drivers())
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterState {
        &mut self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    /// Hand the visible driver at `index` to `on_select`
    ///
    /// Returns false when there is no such driver.
    pub fn activate<F>(&self, index: usize, on_select: F) -> bool
    where
        F: FnOnce(&Driver),
    {
        match self.visible().get(index) {
            Some(driver) => {
                on_select(driver);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::testing::ScriptedFetcher;
    use serde_json::json;

    fn grid() -> serde_json::Value {
        json!([
            {
                "id": 1, "name": "Max Verstappen", "team": "Red Bull Racing",
                "country": "NL", "number": 1
            },
            {"id": 4, "name": "Lando Norris", "team": "McLaren", "country": "GB", "number": 4},
            {"id": 44, "name": "Lewis Hamilton", "team": "Ferrari", "country": "GB", "number": 44}
        ])
    }

    #[tokio::test]
    async fn test_loads_and_filters() {
        let (api, _) = ScriptedFetcher::new().respond("/drivers", grid()).into_api();
        let mut directory = DriverDirectory::new(api);
        assert_eq!(directory.status(), ViewStatus::Idle);

        directory.mount();
        assert_eq!(directory.status(), ViewStatus::Loading(DRIVERS_LOADING));
        directory.settle().await;
        assert!(directory.status().is_ready());
        assert_eq!(directory.visible().len(), 3);

        directory.set_query("gb");
        let names: Vec<_> = directory.visible().iter().map(|d| d.display_name()).collect();
        assert_eq!(names, vec!["Lando Norris", "Lewis Hamilton"]);

        // Number matches as a substring too
        directory.set_query("4");
        assert_eq!(directory.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_activate_hands_over_visible_driver() {
        let (api, _) = ScriptedFetcher::new().respond("/drivers", grid()).into_api();
        let mut directory = DriverDirectory::new(api);
        directory.mount();
        directory.settle().await;
        directory.set_query("ferrari");

        let mut picked = None;
        assert!(directory.activate(0, |d| picked = Some(d.id.clone())));
        assert_eq!(picked.as_deref(), Some("44"));
        assert!(!directory.activate(1, |_| panic!("no second match")));
    }

    #[tokio::test]
    async fn test_failure_shows_generic_message() {
        let (api, _) = ScriptedFetcher::new()
            .fail("/drivers", FetchError::network("/drivers", "connection refused"))
            .into_api();
        let mut directory = DriverDirectory::new(api);
        directory.mount();
        directory.settle().await;

        assert_eq!(directory.status(), ViewStatus::Failed(DRIVERS_ERROR));
        assert!(directory.visible().is_empty());
    }

    #[tokio::test]
    async fn test_mount_twice_fetches_once_and_reload_refetches() {
        let (api, fetcher) = ScriptedFetcher::new().respond("/drivers", grid()).into_api();
        let mut directory = DriverDirectory::new(api);
        directory.mount();
        directory.mount();
        directory.settle().await;
        assert_eq!(fetcher.call_count("/drivers"), 1);

        directory.reload();
        directory.settle().await;
        assert_eq!(fetcher.call_count("/drivers"), 2);
    }
}

//! Driver profile: summary record merged with `GET /drivers/{id}`
//!
//! The detail is keyed on the driver id and discarded whenever the driver
//! changes, so re-selecting an earlier driver always fetches again.

use std::sync::Arc;

use crate::api::Api;
use crate::fetch::FetchController;
use crate::model::{non_empty, or_placeholder, Driver, DriverDetail, DriverStats};
use crate::scene::{SceneRenderer, SceneView};
use crate::tabs::{ProfileTab, TabbedPanel};

use super::{status_of, ViewStatus};

pub const PROFILE_LOADING: &str = "Loading profile…";
pub const PROFILE_ERROR: &str = "Unable to load driver details.";
pub const DRIVER_SCENE_FALLBACK: &str = "Driver 3D model not available.";
pub const CAR_SCENE_FALLBACK: &str = "Car 3D model not available.";

/// One labelled value in the stats grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

pub struct DriverProfile {
    api: Api,
    renderer: Arc<dyn SceneRenderer>,
    driver: Option<Driver>,
    detail: FetchController<String, DriverDetail>,
    tabs: TabbedPanel<ProfileTab>,
}

impl DriverProfile {
    pub fn new(api: Api, renderer: Arc<dyn SceneRenderer>) -> Self {
        Self {
            api,
            renderer,
            driver: None,
            detail: FetchController::new("driver-detail", PROFILE_ERROR).discarding_stale_data(),
            tabs: TabbedPanel::new(),
        }
    }

    /// Show `driver`, fetching its detail unless it is already shown
    ///
    /// Returns whether a request was issued. A driver without an id has no
    /// detail endpoint, so only its summary is shown.
    pub fn show(&mut self, driver: Driver) -> bool {
        if driver.id.is_empty() {
            self.detail.reset();
            self.driver = Some(driver);
            return false;
        }
        let api = self.api.clone();
        let issued = self.detail.observe(driver.id.clone(), move |id| {
            let id = id.clone();
            async move { api.driver_detail(&id).await }
        });
        self.driver = Some(driver);
        issued
    }

    /// Unmount: abort any pending detail request and forget the driver
    pub fn hide(&mut self) {
        self.detail.reset();
        self.driver = None;
    }

    pub fn reload(&mut self) {
        let api = self.api.clone();
        self.detail.reload(move |id| {
            let id = id.clone();
            async move { api.driver_detail(&id).await }
        });
    }

    pub fn poll(&mut self) -> bool {
        self.detail.poll()
    }

    pub async fn settle(&mut self) {
        self.detail.settle().await
    }

    pub fn is_mounted(&self) -> bool {
        self.driver.is_some()
    }

    pub fn status(&self) -> ViewStatus<'_> {
        status_of(&self.detail, PROFILE_LOADING)
    }

    pub fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    pub fn detail(&self) -> Option<&DriverDetail> {
        self.detail.data()
    }

    pub fn tabs(&self) -> &TabbedPanel<ProfileTab> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabbedPanel<ProfileTab> {
        &mut self.tabs
    }

    /// `Team • #number`
    pub fn subtitle(&self) -> String {
        let Some(driver) = &self.driver else {
            return String::new();
        };
        match driver.number_badge() {
            Some(badge) => format!("{} • {}", driver.display_team(), badge),
            None => driver.display_team().to_string(),
        }
    }

    /// Podiums, wins, starts and nationality, with placeholders
    pub fn stats(&self) -> Vec<StatLine> {
        let stats = self
            .detail()
            .and_then(|d| d.stats.clone())
            .unwrap_or_default();
        let DriverStats {
            podiums,
            wins,
            starts,
        } = stats;
        let country = self.driver.as_ref().and_then(|d| d.country.as_deref());

        vec![
            StatLine {
                label: "Podiums",
                value: or_placeholder(podiums.as_deref()).to_string(),
            },
            StatLine {
                label: "Wins",
                value: or_placeholder(wins.as_deref()).to_string(),
            },
            StatLine {
                label: "Starts",
                value: or_placeholder(starts.as_deref()).to_string(),
            },
            StatLine {
                label: "Nationality",
                value: or_placeholder(country).to_string(),
            },
        ]
    }

    /// Driver model URL; the detail wins over the summary when present
    pub fn driver_scene_url(&self) -> Option<&str> {
        non_empty(self.detail().and_then(|d| d.driver_spline_url.as_deref()))
            .or_else(|| non_empty(self.driver.as_ref()?.driver_spline_url.as_deref()))
    }

    /// Car model URL; the detail wins over the summary when present
    pub fn car_scene_url(&self) -> Option<&str> {
        non_empty(self.detail().and_then(|d| d.car_spline_url.as_deref()))
            .or_else(|| non_empty(self.driver.as_ref()?.car_spline_url.as_deref()))
    }

    /// Scene for the active tab
    pub fn scene(&self) -> SceneView {
        match self.tabs.active() {
            ProfileTab::Driver => self
                .renderer
                .render(self.driver_scene_url(), DRIVER_SCENE_FALLBACK),
            ProfileTab::Car => self.renderer.render(self.car_scene_url(), CAR_SCENE_FALLBACK),
        }
    }
}

//! Top-level composition: the selection relay plus every view

use std::sync::Arc;

use crate::api::Api;
use crate::model::Driver;
use crate::scene::SceneRenderer;
use crate::selection::{Selection, SelectionChange};
use crate::views::{DriverDirectory, DriverProfile, Hero, Schedule};

pub struct Dashboard {
    pub hero: Hero,
    pub directory: DriverDirectory,
    pub profile: DriverProfile,
    pub schedule: Schedule,
    selection: Selection<Driver>,
}

impl Dashboard {
    pub fn new(api: Api, renderer: Arc<dyn SceneRenderer>) -> Self {
        Self {
            hero: Hero::new(renderer.as_ref()),
            directory: DriverDirectory::new(api.clone()),
            profile: DriverProfile::new(api.clone(), renderer),
            schedule: Schedule::new(api),
            selection: Selection::new(),
        }
    }

    /// Mount the always-visible views; the profile waits for a selection
    pub fn mount(&mut self) {
        self.directory.mount();
        self.schedule.mount();
    }

    pub fn selected(&self) -> Option<&Driver> {
        self.selection.current()
    }

    /// Select `driver` and mount (or re-key) the profile for it
    pub fn select(&mut self, driver: Driver) -> SelectionChange {
        let change = if driver.id.is_empty() {
            self.selection.select(driver.clone())
        } else {
            self.selection.select_by(driver.clone(), |d| d.id.clone())
        };
        self.profile.show(driver);
        change
    }

    /// Select the visible directory entry at `index`
    pub fn select_visible(&mut self, index: usize) -> Option<SelectionChange> {
        let mut picked = None;
        self.directory.activate(index, |d| picked = Some(d.clone()));
        picked.map(|driver| self.select(driver))
    }

    /// Clear the selection and unmount the profile
    pub fn deselect(&mut self) {
        self.selection.clear();
        self.profile.hide();
    }

    /// Apply completed requests for every view; true if anything changed
    pub fn poll(&mut self) -> bool {
        let directory = self.directory.poll();
        let profile = self.profile.poll();
        let schedule = self.schedule.poll();
        directory || profile || schedule
    }

    /// Wait for every in-flight request to be applied
    pub async fn settle(&mut self) {
        self.directory.settle().await;
        self.profile.settle().await;
        self.schedule.settle().await;
    }

    /// Full reload: selection is dropped and every view remounts
    pub fn reload(&mut self) {
        self.deselect();
        self.directory.reload();
        self.schedule.reload();
    }
}

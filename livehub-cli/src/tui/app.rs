//! Core application state and mode management

use livehub_core::{Api, Dashboard, Driver, LinkRenderer, SelectionChange};
use std::sync::Arc;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Navigation mode - move through panes, switch tabs, select drivers
    #[default]
    Normal,
    /// Typing into the directory search box
    Search,
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Directory,
    Profile,
    Schedule,
}

impl Pane {
    /// Next pane in Tab order
    pub fn next(self) -> Self {
        match self {
            Pane::Directory => Pane::Profile,
            Pane::Profile => Pane::Schedule,
            Pane::Schedule => Pane::Directory,
        }
    }
}

/// Main application state
pub struct App {
    /// Current input mode
    pub mode: Mode,
    /// Which pane is focused
    pub focus: Pane,
    /// Highlighted row in the filtered directory
    pub selected_index: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
    /// API base shown in the status bar
    pub api_base: String,
    pub dashboard: Dashboard,
}

impl App {
    pub fn new(api: Api, api_base: impl Into<String>) -> Self {
        Self {
            mode: Mode::Normal,
            focus: Pane::Directory,
            selected_index: 0,
            should_quit: false,
            status_message: None,
            api_base: api_base.into(),
            dashboard: Dashboard::new(api, Arc::new(LinkRenderer)),
        }
    }

    /// Number of drivers currently shown in the directory
    pub fn visible_len(&self) -> usize {
        self.dashboard.directory.visible().len()
    }

    /// Driver under the cursor
    pub fn highlighted(&self) -> Option<&Driver> {
        self.dashboard
            .directory
            .visible()
            .get(self.selected_index)
            .copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Keep the cursor inside the (possibly shrunk) filtered list
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Switch tabs in the focused panel
    pub fn next_tab(&mut self) {
        match self.focus {
            Pane::Profile => self.dashboard.profile.tabs_mut().next(),
            Pane::Schedule => self.dashboard.schedule.tabs_mut().next(),
            Pane::Directory => {}
        }
    }

    pub fn prev_tab(&mut self) {
        match self.focus {
            Pane::Profile => self.dashboard.profile.tabs_mut().prev(),
            Pane::Schedule => self.dashboard.schedule.tabs_mut().prev(),
            Pane::Directory => {}
        }
    }

    // === Search ===

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.focus = Pane::Directory;
    }

    pub fn search_push(&mut self, c: char) {
        self.dashboard.directory.filter_mut().push(c);
        self.selected_index = 0;
    }

    pub fn search_pop(&mut self) {
        self.dashboard.directory.filter_mut().pop();
        self.selected_index = 0;
    }

    /// Leave search mode, keeping the query
    pub fn confirm_search(&mut self) {
        self.mode = Mode::Normal;
        self.clamp_selection();
    }

    /// Leave search mode and drop the query
    pub fn cancel_search(&mut self) {
        self.dashboard.directory.filter_mut().clear();
        self.mode = Mode::Normal;
        self.clamp_selection();
    }

    // === Selection ===

    /// Select the highlighted driver into the profile
    pub fn select_highlighted(&mut self) {
        match self.dashboard.select_visible(self.selected_index) {
            Some(SelectionChange::Unchanged) | None => {}
            Some(_) => {
                let name = self
                    .dashboard
                    .selected()
                    .map(|d| d.display_name().to_string())
                    .unwrap_or_default();
                self.set_status(format!("Selected {}", name));
            }
        }
    }

    pub fn deselect(&mut self) {
        if self.dashboard.selected().is_some() {
            self.dashboard.deselect();
            if self.focus == Pane::Profile {
                self.focus = Pane::Directory;
            }
            self.set_status("Selection cleared");
        }
    }

    pub fn reload(&mut self) {
        self.dashboard.reload();
        self.selected_index = 0;
        self.set_status("Reloading…");
    }

    /// Apply finished requests; called once per tick
    pub fn tick(&mut self) -> bool {
        let changed = self.dashboard.poll();
        if changed {
            self.clamp_selection();
        }
        changed
    }

    // === Status ===

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

//! Tabbed panel state
//!
//! Switching tabs is purely local; it never issues a request.

/// A fixed, ordered set of tab ids
pub trait TabSet: Copy + Eq + Sized + 'static {
    /// Every tab in display order; the first one is the default
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
}

/// Driver profile: 3D model of the driver or of the car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTab {
    Driver,
    Car,
}

impl TabSet for ProfileTab {
    const ALL: &'static [Self] = &[ProfileTab::Driver, ProfileTab::Car];

    fn label(&self) -> &'static str {
        match self {
            ProfileTab::Driver => "Driver 3D",
            ProfileTab::Car => "Car 3D",
        }
    }
}

/// Schedule: upcoming weekends or recent results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTab {
    Upcoming,
    Recent,
}

impl TabSet for ScheduleTab {
    const ALL: &'static [Self] = &[ScheduleTab::Upcoming, ScheduleTab::Recent];

    fn label(&self) -> &'static str {
        match self {
            ScheduleTab::Upcoming => "Upcoming",
            ScheduleTab::Recent => "Results",
        }
    }
}

/// Active tab of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabbedPanel<T: TabSet> {
    active: T,
}

impl<T: TabSet> Default for TabbedPanel<T> {
    fn default() -> Self {
        Self { active: T::ALL[0] }
    }
}

impl<T: TabSet> TabbedPanel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn set_tab(&mut self, tab: T) {
        self.active = tab;
    }

    pub fn is_active(&self, tab: T) -> bool {
        self.active == tab
    }

    /// Position of the active tab in `T::ALL`
    pub fn index(&self) -> usize {
        T::ALL.iter().position(|t| *t == self.active).unwrap_or(0)
    }

    /// Move to the next tab, wrapping around
    pub fn next(&mut self) {
        let idx = (self.index() + 1) % T::ALL.len();
        self.active = T::ALL[idx];
    }

    /// Move to the previous tab, wrapping around
    pub fn prev(&mut self) {
        let idx = self
            .index()
            .checked_sub(1)
            .unwrap_or(T::ALL.len().saturating_sub(1));
        self.active = T::ALL[idx];
    }

    pub fn labels() -> Vec<&'static str> {
        T::ALL.iter().map(|t| t.label()).collect()
    }
}

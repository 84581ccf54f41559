//! Top-level "selected record or none"

/// What a call to [`Selection::select`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Nothing was selected before
    Mounted,
    /// A different record replaced the previous one
    Replaced,
    /// The same record was selected again
    Unchanged,
}

/// Holds at most one selected record
///
/// Identity is decided by the caller-supplied key so that a refreshed copy
/// of the same record counts as unchanged.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    selected: Option<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    /// Select `record`, comparing identity with `key`
    pub fn select_by<K, F>(&mut self, record: T, key: F) -> SelectionChange
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let change = match &self.selected {
            None => SelectionChange::Mounted,
            Some(prev) if key(prev) == key(&record) => SelectionChange::Unchanged,
            Some(_) => SelectionChange::Replaced,
        };
        self.selected = Some(record);
        change
    }

    /// Drop the selection, returning what was selected
    pub fn clear(&mut self) -> Option<T> {
        self.selected.take()
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn select(&mut self, record: T) -> SelectionChange {
        let change = match &self.selected {
            None => SelectionChange::Mounted,
            Some(prev) if *prev == record => SelectionChange::Unchanged,
            Some(_) => SelectionChange::Replaced,
        };
        self.selected = Some(record);
        change
    }
}

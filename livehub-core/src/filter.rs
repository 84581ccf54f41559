//! Client-side text filtering for record lists
//!
//! Substring match, case-insensitive, across each record's searchable
//! fields. Order of the input list is always preserved.

/// A record that can be matched against a free-text query
pub trait Searchable {
    /// Fields consulted by the filter; `None` and empty fields never match
    fn search_fields(&self) -> Vec<Option<&str>>;
}

/// Normalize a raw query: trimmed and lowercased
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `record` matches an already-normalized, non-empty query
pub fn matches<R: Searchable>(record: &R, normalized: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
        .any(|field| field.to_lowercase().contains(normalized))
}

/// Filter records by query
///
/// An empty (or all-whitespace) query returns every record.
pub fn filter<'a, R: Searchable>(records: &'a [R], query: &str) -> Vec<&'a R> {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return records.iter().collect();
    }

    records.iter().filter(|r| matches(*r, &normalized)).collect()
}

/// Query text for a filterable list
///
/// Holds only the text; the filtered view is recomputed from the current
/// records on demand so it never goes stale when the records change.
#[derive(Debug, Default, Clone)]
pub struct FilterState {
    query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// True when the query would filter anything out
    pub fn is_active(&self) -> bool {
        !normalize_query(&self.query).is_empty()
    }

    pub fn apply<'a, R: Searchable>(&self, records: &'a [R]) -> Vec<&'a R> {
        filter(records, &self.query)
    }
}

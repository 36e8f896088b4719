use serde::{Deserialize, Serialize};

/// A normalized, clamped listing query.
///
/// Callers (the listing service) normalize the search term and clamp the
/// window before constructing this; backends can rely on `term` being
/// trimmed (possibly empty) and `take` being bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectQuery {
    /// Case-insensitive substring matched against title or summary.
    /// Empty matches everything.
    pub term: String,
    /// Records to skip from the newest-first ordering.
    pub skip: usize,
    /// Page size.
    pub take: usize,
}

impl ProjectQuery {
    pub fn new(term: impl Into<String>, skip: usize, take: usize) -> Self {
        Self {
            term: term.into(),
            skip,
            take,
        }
    }
}

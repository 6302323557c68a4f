//! Known-person lookup
//!
//! Absence here is a domain outcome (the 404 path), never a
//! validation failure.

/// Process-wide read-only set of known person ids
#[derive(Debug, Clone)]
pub struct Directory {
    ids: Vec<i64>,
}

impl Directory {
    /// Directory over an explicit id set
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids }
    }

    /// Directory seeded with the known ids
    pub fn seeded() -> Self {
        Self::new(vec![1, 2, 3, 4, 5])
    }

    /// Returns true if the id belongs to a known person
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }
}

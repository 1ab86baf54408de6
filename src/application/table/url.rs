//! Port between the table controller and whatever holds the page URL.

use crate::domain::table::QueryParams;

/// Access to the query string of the current location.
///
/// `write` replaces the current history entry; it never pushes a new one.
pub trait UrlAdapter {
    fn read(&self) -> QueryParams;

    fn write(&mut self, params: QueryParams);
}

/// Location kept in memory, recording every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryUrl {
    current: QueryParams,
    writes: Vec<QueryParams>,
}

impl MemoryUrl {
    pub fn new(raw_query: &str) -> Self {
        Self {
            current: QueryParams::parse(raw_query),
            writes: Vec::new(),
        }
    }

    pub fn query_string(&self) -> String {
        self.current.to_query_string()
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn writes(&self) -> &[QueryParams] {
        &self.writes
    }
}

impl UrlAdapter for MemoryUrl {
    fn read(&self) -> QueryParams {
        self.current.clone()
    }

    fn write(&mut self, params: QueryParams) {
        self.writes.push(params.clone());
        self.current = params;
    }
}

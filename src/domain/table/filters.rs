//! Column filter entries and their single-parameter encoding.
//!
//! Filters travel in one `filters` query parameter as `id=value` pairs joined
//! by commas. Each token escapes `%`, `,` and `=` so values containing the
//! delimiters survive a round-trip; plain tokens are written verbatim.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

const FILTER_TOKEN: &AsciiSet = &CONTROLS.add(b'%').add(b',').add(b'=');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilterEntry {
    pub id: String,
    pub value: String,
}

impl ColumnFilterEntry {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Insertion-ordered filter set with unique column ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters(Vec<ColumnFilterEntry>);

impl ColumnFilters {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from entries; later duplicates overwrite earlier values, blank values are dropped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ColumnFilterEntry>,
    {
        let mut filters = Self::new();
        for entry in entries {
            filters.set(entry.id, entry.value);
        }
        filters
    }

    /// Set the filter for `id`, keeping its original position. A blank value clears it.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.remove(&id);
            return;
        }
        match self.0.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.value = value,
            None => self.0.push(ColumnFilterEntry { id, value }),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.0.retain(|entry| entry.id != id);
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.value.as_str())
    }

    pub fn entries(&self) -> &[ColumnFilterEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `id=value,id=value` in insertion order; `None` when no filter is active.
    pub fn serialize(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.0
                .iter()
                .map(|entry| format!("{}={}", escape(&entry.id), escape(&entry.value)))
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Parse a `filters` parameter. Tokens without `=` or with an empty id are skipped.
    pub fn parse(raw: &str) -> Self {
        let entries = raw.split(',').filter_map(|token| {
            let (id, value) = token.split_once('=')?;
            let id = unescape(id);
            if id.is_empty() {
                return None;
            }
            Some(ColumnFilterEntry::new(id, unescape(value)))
        });
        Self::from_entries(entries)
    }
}

fn escape(token: &str) -> String {
    utf8_percent_encode(token, FILTER_TOKEN).to_string()
}

fn unescape(token: &str) -> String {
    percent_decode_str(token).decode_utf8_lossy().into_owned()
}

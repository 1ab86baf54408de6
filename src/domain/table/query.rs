//! Query-string model for list tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded::{self, Serializer};

pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "page_size";
pub const FILTERS_KEY: &str = "filters";
pub const SORT_BY_KEY: &str = "sort_by";
pub const SORT_ORDER_KEY: &str = "sort_order";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const PAGE_SIZE_CHOICES: [u32; 3] = [30, 50, 100];

/// Keys owned by the table; everything else belongs to the hosting page.
const TABLE_KEYS: [&str; 5] = [PAGE_KEY, PAGE_SIZE_KEY, FILTERS_KEY, SORT_BY_KEY, SORT_ORDER_KEY];

/// Ordered `key=value` pairs of a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a raw query string; a leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self(
            form_urlencoded::parse(raw.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Replace every occurrence of `key` with a single pair at the first position it held.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|(candidate, _)| candidate == key) {
            Some(index) => {
                self.0[index].1 = value;
                let mut seen = false;
                self.0.retain(|(candidate, _)| {
                    if candidate != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.0.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(candidate, _)| candidate != key);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Pairs whose key is not one of the table-owned keys, in original order.
    pub fn without_table_keys(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| !TABLE_KEYS.contains(&key.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Pairs under a `prefix.` namespace, e.g. `filters.title`, with the prefix stripped.
    pub fn namespaced(&self, prefix: &str) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(prefix)?.strip_prefix('.')?;
                (!name.is_empty() && !value.is_empty()).then(|| (name.to_string(), value.clone()))
            })
            .collect()
    }

    /// `application/x-www-form-urlencoded` rendering without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Canonical table state as it appears in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQueryState {
    pub page: u32,
    pub page_size: u32,
    pub filters: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for TableQueryState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            filters: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl TableQueryState {
    /// Read the table keys out of `params`. Missing, unparsable or zero values fall back to defaults.
    pub fn from_params(params: &QueryParams) -> Self {
        let page = positive(params.get(PAGE_KEY)).unwrap_or(DEFAULT_PAGE);
        let page_size = positive(params.get(PAGE_SIZE_KEY)).unwrap_or(DEFAULT_PAGE_SIZE);
        let filters = params
            .get(FILTERS_KEY)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let sort_by = params
            .get(SORT_BY_KEY)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let sort_order = sort_by
            .as_ref()
            .map(|_| {
                params
                    .get(SORT_ORDER_KEY)
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(SortOrder::Asc)
            });

        Self {
            page,
            page_size,
            filters,
            sort_by,
            sort_order,
        }
    }

    /// Append the table keys to `params` in canonical order.
    pub fn write_into(&self, params: &mut QueryParams) {
        params.push(PAGE_KEY, self.page.to_string());
        params.push(PAGE_SIZE_KEY, self.page_size.to_string());
        if let Some(filters) = self.filters.as_ref().filter(|value| !value.is_empty()) {
            params.push(FILTERS_KEY, filters.clone());
        }
        if let Some(sort_by) = self.sort_by.as_ref() {
            params.push(SORT_BY_KEY, sort_by.clone());
            params.push(
                SORT_ORDER_KEY,
                self.sort_order.unwrap_or(SortOrder::Asc).as_str(),
            );
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_leading_question_mark() {
        let params = QueryParams::parse("?page=2&page_size=50");
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("page_size"), Some("50"));
    }

    #[test]
    fn absent_values_use_defaults() {
        let state = TableQueryState::from_params(&QueryParams::parse(""));
        assert_eq!(state, TableQueryState::default());
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 30);
    }

    #[test]
    fn invalid_numbers_use_defaults() {
        let params = QueryParams::parse("page=zero&page_size=0");
        let state = TableQueryState::from_params(&params);
        assert_eq!(state.page, DEFAULT_PAGE);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);

        let params = QueryParams::parse("page=-3&page_size=abc");
        let state = TableQueryState::from_params(&params);
        assert_eq!(state.page, DEFAULT_PAGE);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn sort_order_defaults_to_ascending_when_column_given() {
        let state = TableQueryState::from_params(&QueryParams::parse("sort_by=year"));
        assert_eq!(state.sort_by.as_deref(), Some("year"));
        assert_eq!(state.sort_order, Some(SortOrder::Asc));

        let state =
            TableQueryState::from_params(&QueryParams::parse("sort_by=year&sort_order=DESC"));
        assert_eq!(state.sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn order_without_column_is_ignored() {
        let state = TableQueryState::from_params(&QueryParams::parse("sort_order=desc"));
        assert!(state.sort_by.is_none());
        assert!(state.sort_order.is_none());
    }

    #[test]
    fn caller_keys_survive_in_order() {
        let params = QueryParams::parse("filters.title=up&page=3&tab=drafts&filters=a%3Db");
        let rest = params.without_table_keys();
        assert_eq!(rest.to_query_string(), "filters.title=up&tab=drafts");
    }

    #[test]
    fn namespaced_pairs_strip_prefix_and_skip_blank_values() {
        let params = QueryParams::parse("filters.title=Up&filters.type=&filters=x%3Dy&other=1");
        assert_eq!(
            params.namespaced("filters"),
            vec![("title".to_string(), "Up".to_string())]
        );
    }

    #[test]
    fn set_collapses_duplicates_in_place() {
        let mut params = QueryParams::parse("a=1&page=2&b=2&page=9");
        params.set("page", "4");
        assert_eq!(params.to_query_string(), "a=1&page=4&b=2");
    }

    #[test]
    fn write_into_emits_canonical_order() {
        let state = TableQueryState {
            page: 2,
            page_size: 50,
            filters: Some("name=foo".to_string()),
            sort_by: Some("year".to_string()),
            sort_order: Some(SortOrder::Desc),
        };
        let mut params = QueryParams::new();
        state.write_into(&mut params);
        insta::assert_snapshot!(
            params.to_query_string(),
            @"page=2&page_size=50&filters=name%3Dfoo&sort_by=year&sort_order=desc"
        );
    }
}

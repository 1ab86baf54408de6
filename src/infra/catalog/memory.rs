//! Fixture-backed catalog used for local runs and tests.
//!
//! Filtering, sorting and paging follow the backend's list semantics closely
//! enough for the dashboard: filters match case-insensitively on substrings,
//! sorting compares numbers numerically and everything else as text, and
//! `total_count` reports the number of rows after filtering.

use std::{cmp::Ordering, collections::HashMap, path::Path};

use async_trait::async_trait;
use metrics::counter;
use reelboard_api_types::{JsonRow, ListEnvelope};
use serde_json::Value;
use tracing::info;

use crate::{
    application::catalog::{CatalogError, CatalogSource, ListRequest},
    domain::{
        resources::{Resource, plain_text},
        table::SortOrder,
    },
    infra::{error::InfraError, telemetry::METRIC_CATALOG_REQUEST_TOTAL},
};

const BUILTIN_FIXTURE: &str = include_str!("../../../fixtures/catalog.json");

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    collections: HashMap<Resource, Vec<JsonRow>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the fixture shipped in the binary.
    pub fn builtin() -> Result<Self, InfraError> {
        Self::from_json(BUILTIN_FIXTURE)
    }

    pub async fn from_path(path: &Path) -> Result<Self, InfraError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| InfraError::FixtureRead {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_json(&raw)?;
        info!(
            target = "reelboard::catalog::memory",
            path = %path.display(),
            collections = catalog.collections.len(),
            "loaded catalog fixture"
        );
        Ok(catalog)
    }

    /// Parse `{ "<resource slug>": [ {row}, ... ], ... }`.
    pub fn from_json(raw: &str) -> Result<Self, InfraError> {
        let document: HashMap<String, Vec<JsonRow>> = serde_json::from_str(raw)?;

        let mut catalog = Self::new();
        for (slug, rows) in document {
            let resource = slug
                .parse::<Resource>()
                .map_err(|_| InfraError::FixtureScreen { slug: slug.clone() })?;
            catalog.collections.insert(resource, rows);
        }
        Ok(catalog)
    }

    pub fn with_rows(mut self, resource: Resource, rows: Vec<JsonRow>) -> Self {
        self.collections.insert(resource, rows);
        self
    }

    pub fn len(&self, resource: Resource) -> usize {
        self.collections.get(&resource).map_or(0, Vec::len)
    }

    fn page(
        &self,
        resource: Resource,
        request: &ListRequest,
    ) -> Result<ListEnvelope<JsonRow>, CatalogError> {
        let rows = self
            .collections
            .get(&resource)
            .ok_or(CatalogError::UnknownResource { resource })?;

        let criteria: Vec<(&str, String)> = request
            .filters
            .entries()
            .iter()
            .map(|entry| (entry.id.as_str(), entry.value.to_lowercase()))
            .chain(
                request
                    .extra
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.to_lowercase())),
            )
            .collect();

        let mut matched: Vec<&JsonRow> = rows
            .iter()
            .filter(|row| {
                criteria
                    .iter()
                    .all(|(field, needle)| field_matches(row.get(*field), needle))
            })
            .collect();

        if let Some((field, order)) = request.sort.as_ref() {
            matched.sort_by(|left, right| {
                let ordering = compare_values(left.get(field), right.get(field));
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let total = matched.len() as u64;
        let data = matched
            .into_iter()
            .skip(request.offset())
            .take(request.page_size as usize)
            .cloned()
            .collect();

        Ok(ListEnvelope::success(data, total))
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn list(
        &self,
        resource: Resource,
        request: &ListRequest,
    ) -> Result<ListEnvelope<JsonRow>, CatalogError> {
        counter!(METRIC_CATALOG_REQUEST_TOTAL, "resource" => resource.slug(), "source" => "memory")
            .increment(1);
        self.page(resource, request)
    }
}

fn field_matches(value: Option<&Value>, needle: &str) -> bool {
    match value {
        Some(value) if !value.is_null() => plain_text(value).to_lowercase().contains(needle),
        _ => false,
    }
}

/// Numbers before text, missing values last.
fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let left = left.filter(|value| !value.is_null());
    let right = right.filter(|value| !value.is_null());
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => plain_text(left).cmp(&plain_text(right)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::QueryParams;
    use serde_json::json;

    fn rows(values: Value) -> Vec<JsonRow> {
        values
            .as_array()
            .expect("array")
            .iter()
            .map(|row| row.as_object().cloned().expect("object"))
            .collect()
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new().with_rows(
            Resource::Tags,
            rows(json!([
                {"id": 1, "name": "4K", "usage_count": 14},
                {"id": 2, "name": "Dolby", "usage_count": 9},
                {"id": 3, "name": "HDR", "usage_count": null},
                {"id": 4, "name": "HDR10+", "usage_count": 30},
            ])),
        )
    }

    fn names(envelope: ListEnvelope<JsonRow>) -> Vec<String> {
        envelope
            .into_rows()
            .iter()
            .map(|row| plain_text(&row["name"]))
            .collect()
    }

    #[test]
    fn builtin_fixture_covers_every_screen() {
        let catalog = MemoryCatalog::builtin().expect("fixture parses");
        for resource in Resource::ALL {
            assert!(catalog.len(resource) > 0, "{resource}");
        }
    }

    #[test]
    fn filters_match_case_insensitive_substrings() {
        let request = ListRequest::from_query(&QueryParams::parse("filters=name%3Dhdr"));
        let envelope = catalog().page(Resource::Tags, &request).expect("page");
        assert_eq!(envelope.total_count, Some(2));
        assert_eq!(names(envelope), vec!["HDR", "HDR10+"]);
    }

    #[test]
    fn sort_places_missing_values_last() {
        let request =
            ListRequest::from_query(&QueryParams::parse("sort_by=usage_count&sort_order=asc"));
        let envelope = catalog().page(Resource::Tags, &request).expect("page");
        assert_eq!(names(envelope), vec!["Dolby", "4K", "HDR10+", "HDR"]);
    }

    #[test]
    fn pages_slice_after_filtering() {
        let request = ListRequest::from_query(&QueryParams::parse("page=2&page_size=3"));
        let envelope = catalog().page(Resource::Tags, &request).expect("page");
        assert_eq!(envelope.total_count, Some(4));
        assert_eq!(names(envelope), vec!["HDR10+"]);
    }

    #[test]
    fn namespaced_filters_apply_like_column_filters() {
        let catalog = MemoryCatalog::builtin().expect("fixture parses");
        let request = ListRequest::from_query(&QueryParams::parse("filters.type=series"));
        let envelope = catalog.page(Resource::Movies, &request).expect("page");
        assert!(
            envelope
                .into_rows()
                .iter()
                .all(|row| row["type"] == json!("series"))
        );
    }

    #[test]
    fn missing_collection_is_reported() {
        let request = ListRequest::from_query(&QueryParams::new());
        let error = catalog().page(Resource::Movies, &request).unwrap_err();
        assert!(matches!(error, CatalogError::UnknownResource { .. }));
    }

    #[test]
    fn fixture_with_unknown_screen_is_rejected() {
        let error = MemoryCatalog::from_json(r#"{"directors": []}"#).unwrap_err();
        assert!(matches!(
            error,
            InfraError::FixtureScreen { ref slug } if slug == "directors"
        ));
    }

    #[tokio::test]
    async fn missing_fixture_file_reports_path() {
        let error = MemoryCatalog::from_path(Path::new("fixtures/does-not-exist.json"))
            .await
            .unwrap_err();
        assert!(matches!(error, InfraError::FixtureRead { .. }));
    }
}

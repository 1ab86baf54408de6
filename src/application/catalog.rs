//! Contract with the content backend that serves list pages.

use async_trait::async_trait;
use reelboard_api_types::{JsonRow, ListEnvelope};
use thiserror::Error;

use crate::domain::{
    resources::Resource,
    table::{
        ColumnFilters, QueryParams, SortOrder, TableQueryState,
        query::FILTERS_KEY,
    },
};

/// One page request as sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page: u32,
    pub page_size: u32,
    pub filters: ColumnFilters,
    pub sort: Option<(String, SortOrder)>,
    /// Page-managed `filters.<name>` values, prefix stripped.
    pub extra: Vec<(String, String)>,
}

impl ListRequest {
    /// Build the request described by a location query string.
    pub fn from_query(params: &QueryParams) -> Self {
        Self::from_state(&TableQueryState::from_params(params), params)
    }

    /// Build from the table keys plus the caller keys of the location.
    pub fn from_state(state: &TableQueryState, rest: &QueryParams) -> Self {
        let filters = state
            .filters
            .as_deref()
            .map(ColumnFilters::parse)
            .unwrap_or_default();
        let sort = state
            .sort_by
            .clone()
            .map(|id| (id, state.sort_order.unwrap_or(SortOrder::Asc)));

        Self {
            page: state.page,
            page_size: state.page_size,
            filters,
            sort,
            extra: rest.namespaced(FILTERS_KEY),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Zero-based offset of the first row.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }

    /// Upstream query string parameters.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        let query = TableQueryState {
            page: self.page,
            page_size: self.page_size,
            filters: self.filters.serialize(),
            sort_by: self.sort.as_ref().map(|(id, _)| id.clone()),
            sort_order: self.sort.as_ref().map(|(_, order)| *order),
        };
        query.write_into(&mut params);
        for (name, value) in &self.extra {
            params.push(format!("{FILTERS_KEY}.{name}"), value.clone());
        }
        params
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {message}")]
    Transport { message: String },
    #[error("catalog answered with an error: {message}")]
    Upstream { message: String },
    #[error("catalog response could not be decoded: {message}")]
    Decode { message: String },
    #[error("catalog has no collection for `{resource}`")]
    UnknownResource { resource: Resource },
}

impl CatalogError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            CatalogError::Transport { .. } => "transport",
            CatalogError::Upstream { .. } => "upstream",
            CatalogError::Decode { .. } => "decode",
            CatalogError::UnknownResource { .. } => "unknown_resource",
        }
    }
}

/// Source of list pages for the dashboard screens.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list(
        &self,
        resource: Resource,
        request: &ListRequest,
    ) -> Result<ListEnvelope<JsonRow>, CatalogError>;
}

/// Rows and count of a successful envelope; error envelopes become [`CatalogError::Upstream`].
pub fn accept_envelope(
    envelope: ListEnvelope<JsonRow>,
) -> Result<(Vec<JsonRow>, Option<u64>), CatalogError> {
    if !envelope.is_success() {
        let message = envelope
            .message
            .unwrap_or_else(|| "upstream reported an error".to_string());
        return Err(CatalogError::upstream(message));
    }
    let total = envelope.total_count;
    Ok((envelope.into_rows(), total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_table_and_namespaced_filters() {
        let params = QueryParams::parse(
            "filters.title=Up&filters.type=&page=3&page_size=50&filters=status%3Ddraft&sort_by=year&sort_order=desc",
        );
        let request = ListRequest::from_query(&params);

        assert_eq!(request.page, 3);
        assert_eq!(request.page_size, 50);
        assert_eq!(request.filters.get("status"), Some("draft"));
        assert_eq!(request.sort, Some(("year".to_string(), SortOrder::Desc)));
        assert_eq!(request.extra, vec![("title".to_string(), "Up".to_string())]);
        assert_eq!(request.offset(), 100);
    }

    #[test]
    fn upstream_params_are_canonical() {
        let request = ListRequest::from_query(&QueryParams::parse(
            "filters.title=Up&filters=status%3Ddraft&page=2",
        ));
        insta::assert_snapshot!(
            request.to_params().to_query_string(),
            @"page=2&page_size=30&filters=status%3Ddraft&filters.title=Up"
        );
    }

    #[test]
    fn error_envelope_becomes_upstream_error() {
        let error = accept_envelope(ListEnvelope::error("token expired")).unwrap_err();
        assert!(matches!(error, CatalogError::Upstream { ref message } if message == "token expired"));

        let (rows, total) = accept_envelope(ListEnvelope::success(Vec::new(), 0)).expect("ok");
        assert!(rows.is_empty());
        assert_eq!(total, Some(0));
    }
}

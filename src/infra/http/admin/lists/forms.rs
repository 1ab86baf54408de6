use serde::Deserialize;

use crate::{
    application::{error::HttpError, table::LoadMoreState},
    domain::table::{
        ColumnFilterEntry, ColumnFilters, ColumnVisibility, QueryParams, TableAction,
        TableQueryState, TableState,
    },
};

pub(super) const CURRENT_QUERY_FIELD: &str = "current_query";
pub(super) const PAGE_COUNT_FIELD: &str = "page_count";
pub(super) const HIDDEN_COLUMN_FIELD: &str = "hidden_column";
pub(super) const PAGE_SIZE_CHOICE_FIELD: &str = "page_size_choice";
pub(super) const MORE_PAGE_FIELD: &str = "more_page";
pub(super) const FILTER_INPUT_PREFIX: &str = "filter.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PanelQuery {
    pub(super) action: Option<String>,
    pub(super) column: Option<String>,
}

/// Table state re-posted by the panel form.
#[derive(Debug, Clone)]
pub(super) struct PanelForm {
    pub(super) current_query: String,
    pub(super) query: TableQueryState,
    pub(super) page_count: Option<u32>,
    pub(super) hidden_columns: Vec<String>,
    pub(super) filter_inputs: Vec<ColumnFilterEntry>,
    pub(super) page_size_choice: Option<u32>,
    pub(super) more_page: Option<u32>,
}

impl PanelForm {
    pub(super) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let params = QueryParams::from_pairs(pairs);
        let query = TableQueryState::from_params(&params);

        let mut hidden_columns = Vec::new();
        let mut filter_inputs = Vec::new();
        for (key, value) in params.iter() {
            if key == HIDDEN_COLUMN_FIELD && !value.is_empty() {
                hidden_columns.push(value.to_string());
            } else if let Some(id) = key.strip_prefix(FILTER_INPUT_PREFIX) {
                filter_inputs.push(ColumnFilterEntry::new(id, value.trim()));
            }
        }

        Self {
            current_query: params.get(CURRENT_QUERY_FIELD).unwrap_or_default().to_string(),
            query,
            page_count: positive(params.get(PAGE_COUNT_FIELD)),
            hidden_columns,
            filter_inputs,
            page_size_choice: positive(params.get(PAGE_SIZE_CHOICE_FIELD)),
            more_page: positive(params.get(MORE_PAGE_FIELD)),
        }
    }

    /// In-memory table state carried by the form.
    pub(super) fn table_state(&self) -> TableState {
        let mut state = TableState::from_query(&self.query);
        state.column_visibility = ColumnVisibility::hiding(self.hidden_columns.iter().cloned());
        state.page_count = self.page_count;
        state
    }

    pub(super) fn load_more_state(&self) -> LoadMoreState {
        LoadMoreState {
            page_number: self.more_page.unwrap_or(self.query.page),
            ..LoadMoreState::default()
        }
    }

    /// Current filters with the visible filter inputs applied on top.
    fn merged_filters(&self) -> Vec<ColumnFilterEntry> {
        let mut filters = self
            .query
            .filters
            .as_deref()
            .map(ColumnFilters::parse)
            .unwrap_or_default();
        for input in &self.filter_inputs {
            filters.set(input.id.clone(), input.value.clone());
        }
        filters.entries().to_vec()
    }
}

/// User interaction that triggered a panel request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PanelAction {
    Refresh,
    First,
    Previous,
    Next,
    Last,
    PageSize,
    Sort(String),
    Filter,
    ClearFilters,
    ToggleColumn(String),
}

impl PanelAction {
    pub(super) fn parse(query: &PanelQuery) -> Result<Self, HttpError> {
        let column = || {
            query
                .column
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    HttpError::new(
                        "infra::http::admin::lists::PanelAction::parse",
                        axum::http::StatusCode::BAD_REQUEST,
                        "Missing column",
                        "column-scoped table action without `column`",
                    )
                })
        };

        let action = match query.action.as_deref().unwrap_or("refresh") {
            "refresh" => PanelAction::Refresh,
            "first" => PanelAction::First,
            "previous" => PanelAction::Previous,
            "next" => PanelAction::Next,
            "last" => PanelAction::Last,
            "page_size" => PanelAction::PageSize,
            "sort" => PanelAction::Sort(column()?),
            "filter" => PanelAction::Filter,
            "clear_filters" => PanelAction::ClearFilters,
            "toggle_column" => PanelAction::ToggleColumn(column()?),
            other => {
                return Err(HttpError::new(
                    "infra::http::admin::lists::PanelAction::parse",
                    axum::http::StatusCode::BAD_REQUEST,
                    "Unknown table action",
                    format!("unknown table action `{other}`"),
                ));
            }
        };
        Ok(action)
    }

    pub(super) fn table_action(self, form: &PanelForm) -> Option<TableAction> {
        match self {
            PanelAction::Refresh => None,
            PanelAction::First => Some(TableAction::FirstPage),
            PanelAction::Previous => Some(TableAction::PreviousPage),
            PanelAction::Next => Some(TableAction::NextPage),
            PanelAction::Last => Some(TableAction::LastPage),
            PanelAction::PageSize => form.page_size_choice.map(TableAction::SetPageSize),
            PanelAction::Sort(id) => Some(TableAction::ToggleSort(id)),
            PanelAction::Filter => Some(TableAction::SetColumnFilters(form.merged_filters())),
            PanelAction::ClearFilters => Some(TableAction::SetColumnFilters(Vec::new())),
            PanelAction::ToggleColumn(id) => Some(TableAction::ToggleColumnVisibility(id)),
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value >= 1)
}

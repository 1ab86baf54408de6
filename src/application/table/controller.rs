//! Server-synchronised table controller.
//!
//! The controller tracks what the user asked for (page, page size, filters,
//! sort, visible columns) and mirrors the URL-relevant part of it into the
//! location through a [`UrlAdapter`]. It never fetches rows: the hosting page
//! reads the query string, fetches one page and hands it over as
//! [`TableProps`].

use std::collections::HashSet;
use std::mem;

use tracing::debug;

use super::url::UrlAdapter;
use crate::{
    domain::{
        error::DomainError,
        table::{
            ColumnDescriptor, DisplayValue, PAGE_SIZE_CHOICES, QueryParams, TableAction,
            TableQueryState, TableState, reduce,
        },
    },
    presentation::admin::views::table::{
        ColumnToggleView, LoadMoreView, PageSizeOptionView, TableCellView, TableHeaderView,
        TablePaginationView, TableRowView, TableView,
    },
};

pub const EMPTY_MESSAGE: &str = "No results.";

/// Writes to the URL are only allowed once hydration has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Hydrating,
    Synced,
}

/// Caller-owned cursor for "load more" listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreState {
    pub page_number: u32,
    pub disabled: bool,
    pub is_pending: bool,
}

impl Default for LoadMoreState {
    fn default() -> Self {
        Self {
            page_number: 1,
            disabled: false,
            is_pending: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    #[default]
    Paged,
    Infinite(LoadMoreState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    pub hide_pagination: bool,
    pub disable_url_updates: bool,
    pub mode: TableMode,
}

/// One fetched page as supplied by the hosting page.
#[derive(Debug, Clone)]
pub struct TableProps<Row> {
    pub data: Option<Vec<Row>>,
    pub row_count: Option<u64>,
    pub page_count: Option<u32>,
    pub loading: bool,
}

impl<Row> Default for TableProps<Row> {
    fn default() -> Self {
        Self {
            data: None,
            row_count: None,
            page_count: None,
            loading: false,
        }
    }
}

impl<Row> TableProps<Row> {
    pub fn rows(&self) -> &[Row] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// First pass after mount; the hydrated URL is left untouched.
    Hydrated,
    /// URL updates are disabled for this table.
    Disabled,
    /// The location already carries the canonical query.
    Unchanged,
    /// The location was replaced with the contained query.
    Replaced(QueryParams),
}

pub struct TableController<Row> {
    columns: Vec<Box<dyn ColumnDescriptor<Row>>>,
    options: TableOptions,
    state: TableState,
    rest: QueryParams,
    phase: SyncPhase,
}

impl<Row> TableController<Row> {
    /// Build a controller from the current location. The first [`reconcile`](Self::reconcile)
    /// only completes hydration.
    pub fn mount(
        columns: Vec<Box<dyn ColumnDescriptor<Row>>>,
        options: TableOptions,
        url: &dyn UrlAdapter,
    ) -> Result<Self, DomainError> {
        let params = url.read();
        let query = TableQueryState::from_params(&params);
        let state = TableState::from_query(&query);
        Self::build(
            columns,
            options,
            state,
            params.without_table_keys(),
            SyncPhase::Hydrating,
        )
    }

    /// Continue a session whose in-memory state was carried across requests.
    pub fn resume(
        columns: Vec<Box<dyn ColumnDescriptor<Row>>>,
        options: TableOptions,
        state: TableState,
        rest: QueryParams,
    ) -> Result<Self, DomainError> {
        Self::build(columns, options, state, rest, SyncPhase::Synced)
    }

    fn build(
        columns: Vec<Box<dyn ColumnDescriptor<Row>>>,
        options: TableOptions,
        state: TableState,
        rest: QueryParams,
        phase: SyncPhase,
    ) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(DomainError::duplicate_column(column.id()));
            }
        }

        Ok(Self {
            columns,
            options,
            state,
            rest,
            phase,
        })
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Query keys owned by the hosting page, passed through untouched.
    pub fn rest(&self) -> &QueryParams {
        &self.rest
    }

    pub fn query_state(&self) -> TableQueryState {
        self.state.to_query()
    }

    pub fn columns(&self) -> impl Iterator<Item = &dyn ColumnDescriptor<Row>> {
        self.columns.iter().map(|column| column.as_ref())
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &dyn ColumnDescriptor<Row>> {
        self.columns()
            .filter(|column| self.state.column_visibility.is_visible(column.id()))
    }

    fn column(&self, id: &str) -> Option<&dyn ColumnDescriptor<Row>> {
        self.columns().find(|column| column.id() == id)
    }

    /// Apply a user action. Actions targeting a column without the matching
    /// capability are dropped; returns whether the action was applied.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        if let Some(reason) = self.rejection(&action) {
            debug!(
                target = "reelboard::table",
                action = ?action,
                reason,
                "table action ignored"
            );
            return false;
        }

        let state = mem::take(&mut self.state);
        self.state = reduce(state, action);
        true
    }

    fn rejection(&self, action: &TableAction) -> Option<&'static str> {
        match action {
            TableAction::ToggleSort(id) => self.capability(id, |column| column.sortable()),
            TableAction::SetColumnFilter { id, .. } | TableAction::ClearColumnFilter(id) => {
                self.capability(id, |column| column.filterable())
            }
            TableAction::SetColumnVisibility { id, .. }
            | TableAction::ToggleColumnVisibility(id) => {
                self.capability(id, |column| column.hideable())
            }
            TableAction::SetColumnFilters(entries) => entries
                .iter()
                .find_map(|entry| self.capability(&entry.id, |column| column.filterable())),
            _ => None,
        }
    }

    fn capability<F>(&self, id: &str, allowed: F) -> Option<&'static str>
    where
        F: Fn(&dyn ColumnDescriptor<Row>) -> bool,
    {
        match self.column(id) {
            None => Some("unknown column"),
            Some(column) if !allowed(column) => Some("column capability disabled"),
            Some(_) => None,
        }
    }

    /// Record the page count for the fetched page; derived from the row count
    /// when the caller does not supply it.
    pub fn sync_page_count(&mut self, row_count: Option<u64>, page_count: Option<u32>) {
        let page_size = u64::from(self.state.pagination.page_size.max(1));
        let count = page_count.or_else(|| {
            row_count.map(|rows| u32::try_from(rows.div_ceil(page_size)).unwrap_or(u32::MAX))
        });
        self.dispatch(TableAction::SetPageCount(count));
    }

    /// Caller keys followed by the canonical table keys.
    pub fn candidate_query(&self) -> QueryParams {
        let mut params = self.rest.clone();
        self.state.to_query().write_into(&mut params);
        params
    }

    /// Bring the location in line with the current state.
    pub fn reconcile(&mut self, url: &mut dyn UrlAdapter) -> Reconciliation {
        if self.phase == SyncPhase::Hydrating {
            self.phase = SyncPhase::Synced;
            return Reconciliation::Hydrated;
        }
        if self.options.disable_url_updates {
            return Reconciliation::Disabled;
        }

        let candidate = self.candidate_query();
        if candidate.to_query_string() == url.read().to_query_string() {
            return Reconciliation::Unchanged;
        }

        debug!(
            target = "reelboard::table",
            query = %candidate,
            "replacing location query"
        );
        url.write(candidate.clone());
        Reconciliation::Replaced(candidate)
    }

    pub fn load_more_state(&self) -> Option<LoadMoreState> {
        match self.options.mode {
            TableMode::Infinite(state) => Some(state),
            TableMode::Paged => None,
        }
    }

    /// Point the "load more" cursor at the current page, for a table rendered from scratch.
    pub fn restart_more(&mut self) {
        let page_number = self.state.pagination.page();
        if let TableMode::Infinite(ref mut more) = self.options.mode {
            *more = LoadMoreState {
                page_number,
                ..LoadMoreState::default()
            };
        }
    }

    /// Mark a "load more" request as in flight and return the page to fetch.
    pub fn request_more(&mut self) -> Option<u32> {
        let TableMode::Infinite(ref mut more) = self.options.mode else {
            return None;
        };
        if more.disabled || more.is_pending {
            return None;
        }
        let next = more.page_number.checked_add(1)?;
        more.is_pending = true;
        Some(next)
    }

    /// Record the outcome of a "load more" fetch.
    pub fn finish_more(&mut self, fetched: usize) {
        let page_size = self.state.pagination.page_size as usize;
        let TableMode::Infinite(ref mut more) = self.options.mode else {
            return;
        };
        if more.is_pending {
            more.page_number = more.page_number.saturating_add(1);
            more.is_pending = false;
        }
        more.disabled = fetched < page_size;
    }

    /// View model for the current state and the supplied page.
    pub fn view(&self, props: &TableProps<Row>) -> TableView {
        let visible: Vec<&dyn ColumnDescriptor<Row>> = self.visible_columns().collect();

        let headers = visible
            .iter()
            .map(|column| self.header_view(*column))
            .collect::<Vec<_>>();

        let rows = props
            .rows()
            .iter()
            .map(|row| TableRowView {
                cells: visible
                    .iter()
                    .map(|column| cell_view(column.render(row)))
                    .collect(),
            })
            .collect();

        let column_toggles = self
            .columns()
            .filter(|column| column.hideable())
            .map(|column| ColumnToggleView {
                id: column.id().to_string(),
                label: header_label(column),
                visible: self.state.column_visibility.is_visible(column.id()),
            })
            .collect();

        let (pagination, load_more) = match self.options.mode {
            TableMode::Infinite(more) => (
                None,
                Some(LoadMoreView {
                    next_page: more.page_number.saturating_add(1),
                    disabled: more.disabled || props.loading,
                    pending: more.is_pending,
                }),
            ),
            TableMode::Paged if self.options.hide_pagination => (None, None),
            TableMode::Paged => (Some(self.pagination_view(props)), None),
        };

        TableView {
            has_filters: headers.iter().any(|header| header.filterable),
            column_span: visible.len().max(1),
            headers,
            rows,
            empty_message: EMPTY_MESSAGE,
            column_toggles,
            pagination,
            load_more,
        }
    }

    fn header_view(&self, column: &dyn ColumnDescriptor<Row>) -> TableHeaderView {
        let sort_direction = self
            .state
            .sorting
            .as_ref()
            .filter(|sorting| sorting.id == column.id())
            .map(|sorting| sorting.order.as_str());

        TableHeaderView {
            id: column.id().to_string(),
            label: header_label(column),
            sortable: column.sortable(),
            sort_direction,
            filterable: column.filterable(),
            filter_value: self
                .state
                .column_filters
                .get(column.id())
                .unwrap_or_default()
                .to_string(),
        }
    }

    fn pagination_view(&self, props: &TableProps<Row>) -> TablePaginationView {
        let page = self.state.pagination.page();
        let page_size = self.state.pagination.page_size;
        let page_count = self.state.page_count;

        let mut summary = match page_count {
            Some(count) => format!("Хуудас {page} / {}", count.max(1)),
            None => format!("Хуудас {page}"),
        };
        if let Some(rows) = props.row_count {
            summary.push_str(&format!(" (Нийт {rows})"));
        }

        let mut sizes: Vec<u32> = PAGE_SIZE_CHOICES.to_vec();
        if !sizes.contains(&page_size) {
            sizes.push(page_size);
            sizes.sort_unstable();
        }

        let at_start = !self.state.can_previous_page();
        let at_end = !self.state.can_next_page();

        TablePaginationView {
            page,
            page_count,
            row_count: props.row_count,
            summary,
            page_sizes: sizes
                .into_iter()
                .map(|value| PageSizeOptionView {
                    value,
                    selected: value == page_size,
                })
                .collect(),
            first_disabled: at_start || props.loading,
            previous_disabled: at_start || props.loading,
            next_disabled: at_end || props.loading,
            last_disabled: at_end || page_count.is_none() || props.loading,
        }
    }
}

fn header_label<Row>(column: &dyn ColumnDescriptor<Row>) -> String {
    column.header().unwrap_or(column.id()).to_string()
}

fn cell_view(value: DisplayValue) -> TableCellView {
    match value {
        DisplayValue::Text(text) => TableCellView {
            text,
            badge_class: None,
        },
        DisplayValue::Badge { label, tone } => TableCellView {
            text: label,
            badge_class: Some(tone.as_class()),
        },
        DisplayValue::Empty => TableCellView {
            text: String::new(),
            badge_class: None,
        },
    }
}

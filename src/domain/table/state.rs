//! In-memory table state and the pure reducer that drives it.

use std::collections::BTreeMap;

use super::filters::{ColumnFilterEntry, ColumnFilters};
use super::query::{SortOrder, TableQueryState};

/// Highest page index whose one-based page number still fits in a `u32`.
pub const MAX_PAGE_INDEX: u32 = u32::MAX - 1;

/// Zero-based mirror of `page` / `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: u32,
    pub page_size: u32,
}

impl PaginationState {
    pub fn page(&self) -> u32 {
        self.page_index.saturating_add(1)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        let query = TableQueryState::default();
        Self {
            page_index: query.page - 1,
            page_size: query.page_size,
        }
    }
}

/// Column id to visibility flag; absent ids are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility(BTreeMap<String, bool>);

impl ColumnVisibility {
    pub fn is_visible(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(true)
    }

    pub fn set(&mut self, id: impl Into<String>, visible: bool) {
        self.0.insert(id.into(), visible);
    }

    pub fn hidden_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(id, _)| id.as_str())
    }

    /// Build from a list of hidden column ids.
    pub fn hiding<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(|id| (id.into(), false)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingState {
    pub id: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub pagination: PaginationState,
    pub column_filters: ColumnFilters,
    pub column_visibility: ColumnVisibility,
    pub sorting: Option<SortingState>,
    /// Total pages reported by the hosting page; `None` when unknown.
    pub page_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    SetPageIndex(u32),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    SetPageSize(u32),
    SetColumnFilter { id: String, value: String },
    ClearColumnFilter(String),
    SetColumnFilters(Vec<ColumnFilterEntry>),
    ToggleSort(String),
    ClearSort,
    SetColumnVisibility { id: String, visible: bool },
    ToggleColumnVisibility(String),
    SetPageCount(Option<u32>),
}

impl TableState {
    /// Seed state from the table keys of a query string.
    pub fn from_query(query: &TableQueryState) -> Self {
        let column_filters = query
            .filters
            .as_deref()
            .map(ColumnFilters::parse)
            .unwrap_or_default();
        let sorting = query.sort_by.as_ref().map(|id| SortingState {
            id: id.clone(),
            order: query.sort_order.unwrap_or(SortOrder::Asc),
        });

        Self {
            pagination: PaginationState {
                page_index: query.page.saturating_sub(1).min(MAX_PAGE_INDEX),
                page_size: query.page_size.max(1),
            },
            column_filters,
            column_visibility: ColumnVisibility::default(),
            sorting,
            page_count: None,
        }
    }

    /// Canonical query-string projection. Visibility and page count are not part of it.
    pub fn to_query(&self) -> TableQueryState {
        TableQueryState {
            page: self.pagination.page(),
            page_size: self.pagination.page_size,
            filters: self.column_filters.serialize(),
            sort_by: self.sorting.as_ref().map(|sorting| sorting.id.clone()),
            sort_order: self.sorting.as_ref().map(|sorting| sorting.order),
        }
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    /// Unknown page counts never block forward navigation.
    pub fn can_next_page(&self) -> bool {
        match self.page_count {
            Some(count) => self.pagination.page() < count,
            None => self.pagination.page_index < MAX_PAGE_INDEX,
        }
    }

    fn clamp_index(&self, index: u32) -> u32 {
        match self.page_count {
            Some(count) if count > 0 => index.min(count - 1),
            Some(_) => 0,
            None => index.min(MAX_PAGE_INDEX),
        }
    }
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(mut state: TableState, action: TableAction) -> TableState {
    match action {
        TableAction::SetPageIndex(index) => {
            state.pagination.page_index = state.clamp_index(index);
        }
        TableAction::FirstPage => {
            state.pagination.page_index = 0;
        }
        TableAction::PreviousPage => {
            state.pagination.page_index = state.pagination.page_index.saturating_sub(1);
        }
        TableAction::NextPage => {
            if state.can_next_page() {
                state.pagination.page_index += 1;
            }
        }
        TableAction::LastPage => {
            if let Some(count) = state.page_count {
                state.pagination.page_index = count.saturating_sub(1).min(MAX_PAGE_INDEX);
            }
        }
        TableAction::SetPageSize(size) => {
            let size = size.max(1);
            let first_row = u64::from(state.pagination.page_index)
                * u64::from(state.pagination.page_size);
            state.pagination.page_size = size;
            state.pagination.page_index = u32::try_from(first_row / u64::from(size))
                .map_or(MAX_PAGE_INDEX, |index| index.min(MAX_PAGE_INDEX));
            // The old page count was computed for the old size.
            state.page_count = None;
        }
        TableAction::SetColumnFilter { id, value } => {
            state.column_filters.set(id, value);
            state.pagination.page_index = 0;
        }
        TableAction::ClearColumnFilter(id) => {
            state.column_filters.remove(&id);
            state.pagination.page_index = 0;
        }
        TableAction::SetColumnFilters(entries) => {
            state.column_filters = ColumnFilters::from_entries(entries);
            state.pagination.page_index = 0;
        }
        TableAction::ToggleSort(id) => {
            state.sorting = match state.sorting.take() {
                Some(current) if current.id == id => match current.order {
                    SortOrder::Asc => Some(SortingState {
                        id,
                        order: SortOrder::Desc,
                    }),
                    SortOrder::Desc => None,
                },
                _ => Some(SortingState {
                    id,
                    order: SortOrder::Asc,
                }),
            };
            state.pagination.page_index = 0;
        }
        TableAction::ClearSort => {
            state.sorting = None;
            state.pagination.page_index = 0;
        }
        TableAction::SetColumnVisibility { id, visible } => {
            state.column_visibility.set(id, visible);
        }
        TableAction::ToggleColumnVisibility(id) => {
            let visible = state.column_visibility.is_visible(&id);
            state.column_visibility.set(id, !visible);
        }
        TableAction::SetPageCount(count) => {
            state.page_count = count;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_pages(page_index: u32, page_count: u32) -> TableState {
        TableState {
            pagination: PaginationState {
                page_index,
                page_size: 30,
            },
            page_count: Some(page_count),
            ..TableState::default()
        }
    }

    #[test]
    fn next_page_advances_inside_range() {
        let state = reduce(with_pages(2, 5), TableAction::NextPage);
        assert_eq!(state.pagination.page_index, 3);
    }

    #[test]
    fn navigation_stops_at_boundaries() {
        let state = reduce(with_pages(4, 5), TableAction::NextPage);
        assert_eq!(state.pagination.page_index, 4);

        let state = reduce(with_pages(0, 5), TableAction::PreviousPage);
        assert_eq!(state.pagination.page_index, 0);

        let state = reduce(with_pages(1, 5), TableAction::LastPage);
        assert_eq!(state.pagination.page_index, 4);

        let state = reduce(with_pages(3, 5), TableAction::FirstPage);
        assert_eq!(state.pagination.page_index, 0);
    }

    #[test]
    fn set_page_index_clamps_to_known_count() {
        let state = reduce(with_pages(0, 5), TableAction::SetPageIndex(40));
        assert_eq!(state.pagination.page_index, 4);

        let unknown = TableState::default();
        let state = reduce(unknown, TableAction::SetPageIndex(40));
        assert_eq!(state.pagination.page_index, 40);
    }

    #[test]
    fn page_size_change_keeps_first_visible_row() {
        let state = reduce(with_pages(3, 10), TableAction::SetPageSize(100));
        assert_eq!(state.pagination.page_size, 100);
        assert_eq!(state.pagination.page_index, 0);

        let state = reduce(with_pages(9, 10), TableAction::SetPageSize(50));
        assert_eq!(state.pagination.page_index, 5);
        assert_eq!(state.page_count, None);
    }

    #[test]
    fn page_index_never_passes_last_representable_page() {
        let query = TableQueryState {
            page: u32::MAX,
            ..TableQueryState::default()
        };
        let state = TableState::from_query(&query);
        assert_eq!(state.pagination.page_index, MAX_PAGE_INDEX);
        assert!(!state.can_next_page());

        let state = reduce(state, TableAction::NextPage);
        assert_eq!(state.pagination.page_index, MAX_PAGE_INDEX);
        assert_eq!(state.to_query().page, u32::MAX);

        let state = reduce(TableState::default(), TableAction::SetPageIndex(u32::MAX));
        assert_eq!(state.pagination.page(), u32::MAX);
    }

    #[test]
    fn page_size_shrink_at_huge_index_saturates() {
        let state = TableState {
            pagination: PaginationState {
                page_index: 49_999_999,
                page_size: 100,
            },
            ..TableState::default()
        };
        let state = reduce(state, TableAction::SetPageSize(1));
        assert_eq!(state.pagination.page_size, 1);
        assert_eq!(state.pagination.page_index, MAX_PAGE_INDEX);
        assert_eq!(state.to_query().page, u32::MAX);
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let state = reduce(
            with_pages(3, 5),
            TableAction::SetColumnFilter {
                id: "name".to_string(),
                value: "foo".to_string(),
            },
        );
        assert_eq!(state.pagination.page_index, 0);
        assert_eq!(state.column_filters.get("name"), Some("foo"));
    }

    #[test]
    fn sort_toggle_cycles_through_orders() {
        let state = reduce(TableState::default(), TableAction::ToggleSort("year".into()));
        assert_eq!(
            state.sorting,
            Some(SortingState {
                id: "year".into(),
                order: SortOrder::Asc
            })
        );
        let state = reduce(state, TableAction::ToggleSort("year".into()));
        assert_eq!(state.sorting.as_ref().map(|s| s.order), Some(SortOrder::Desc));
        let state = reduce(state, TableAction::ToggleSort("year".into()));
        assert!(state.sorting.is_none());
    }

    #[test]
    fn sorting_another_column_restarts_ascending() {
        let state = reduce(TableState::default(), TableAction::ToggleSort("year".into()));
        let state = reduce(state, TableAction::ToggleSort("title".into()));
        assert_eq!(
            state.sorting,
            Some(SortingState {
                id: "title".into(),
                order: SortOrder::Asc
            })
        );
    }

    #[test]
    fn visibility_toggles_are_local_only() {
        let state = reduce(
            TableState::default(),
            TableAction::ToggleColumnVisibility("year".into()),
        );
        assert!(!state.column_visibility.is_visible("year"));
        assert!(state.column_visibility.is_visible("title"));
        assert_eq!(state.to_query(), TableQueryState::default());

        let state = reduce(state, TableAction::ToggleColumnVisibility("year".into()));
        assert!(state.column_visibility.is_visible("year"));
    }

    #[test]
    fn query_projection_round_trips() {
        let query = TableQueryState {
            page: 7,
            page_size: 50,
            filters: Some("name=foo,status=active".into()),
            sort_by: Some("year".into()),
            sort_order: Some(SortOrder::Desc),
        };
        assert_eq!(TableState::from_query(&query).to_query(), query);
    }
}

//! Server-driven list table: query model, column filters, column descriptors
//! and the pure state reducer. Nothing here performs I/O.

pub mod column;
pub mod filters;
pub mod query;
pub mod state;

pub use column::{BadgeTone, Column, ColumnDescriptor, DisplayValue};
pub use filters::{ColumnFilterEntry, ColumnFilters};
pub use query::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PAGE_SIZE_CHOICES, QueryParams, SortOrder, TableQueryState,
};
pub use state::{
    ColumnVisibility, MAX_PAGE_INDEX, PaginationState, SortingState, TableAction, TableState,
    reduce,
};

//! Table controller and the URL port it synchronises through.

pub mod controller;
pub mod url;

pub use controller::{
    EMPTY_MESSAGE, LoadMoreState, Reconciliation, SyncPhase, TableController, TableMode,
    TableOptions, TableProps,
};
pub use url::{MemoryUrl, UrlAdapter};

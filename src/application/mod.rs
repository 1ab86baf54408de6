//! Use cases shared by the HTTP surface: the table controller, the catalog
//! contract and SSE response helpers.

pub mod catalog;
pub mod error;
pub mod stream;
pub mod table;

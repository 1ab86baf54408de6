mod http;
mod memory;

pub use http::HttpCatalog;
pub use memory::MemoryCatalog;

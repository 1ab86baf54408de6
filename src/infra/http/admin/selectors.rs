//! Shared CSS selectors used by admin Datastar responses.

use crate::domain::resources::Resource;

pub const TABLE_BODY: &str = "[data-role=\"table-body\"]";
pub const TABLE_LOAD_MORE: &str = "[data-role=\"table-load-more\"]";

pub fn list_panel(resource: Resource) -> String {
    format!("[data-admin-panel=\"{}\"]", resource.slug())
}

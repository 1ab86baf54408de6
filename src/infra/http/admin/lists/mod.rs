mod forms;
mod handlers;
mod panel;

pub(super) use handlers::{admin_list, admin_list_more, admin_list_panel};

mod health;
mod history;
mod lists;
mod selectors;
mod shared;
mod state;

pub use state::AdminState;

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::domain::resources::Resource;

use super::middleware::{log_responses, set_request_context};

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/_health", get(health::admin_health))
        .route("/{resource}", get(lists::admin_list))
        .route("/{resource}/panel", post(lists::admin_list_panel))
        .route("/{resource}/more", post(lists::admin_list_more))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn landing() -> Redirect {
    Redirect::to(&format!("/{}", Resource::Movies.slug()))
}

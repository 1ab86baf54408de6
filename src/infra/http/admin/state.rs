use std::sync::Arc;

use crate::application::catalog::CatalogSource;

#[derive(Clone)]
pub struct AdminState {
    pub catalog: Arc<dyn CatalogSource>,
}

impl AdminState {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self { catalog }
    }
}

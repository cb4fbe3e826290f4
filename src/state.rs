//! Shared application state for all routes. Built once at startup and cloned per request.

use crate::service::QueryService;
use crate::store::BakeryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub queries: QueryService,
}

impl AppState {
    pub fn new(store: Arc<dyn BakeryStore>) -> Self {
        Self {
            queries: QueryService::new(store),
        }
    }
}

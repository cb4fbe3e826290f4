//! Router assembly.

mod bakery;
mod common;

pub use bakery::bakery_routes;
pub use common::common_routes_with_ready;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application: bakery routes, operational routes, per-request trace spans.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(bakery_routes(state.clone()))
        .merge(common_routes_with_ready(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

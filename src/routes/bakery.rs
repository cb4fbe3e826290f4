//! Bakery and baked good routes. `{id}` must parse as an integer; otherwise axum's `Path`
//! extractor rejects the request before a handler runs.

use crate::handlers::{get_bakery, index, list_bakeries, list_by_price, most_expensive};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn bakery_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/bakeries", get(list_bakeries))
        .route("/bakeries/:id", get(get_bakery))
        .route("/baked_goods/by_price", get(list_by_price))
        .route("/baked_goods/most_expensive", get(most_expensive))
        .with_state(state)
}

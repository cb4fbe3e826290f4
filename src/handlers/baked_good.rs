//! Baked good handlers: price-descending listing and the single most expensive good.

use crate::error::AppError;
use crate::response::{ok_many, ok_one};
use crate::serialize::baked_good_flat;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn list_by_price(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let goods = state
        .queries
        .list_baked_goods_by_price_desc()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "error fetching baked goods by price"))?;
    Ok(ok_many(goods.iter().map(baked_good_flat).collect()))
}

pub async fn most_expensive(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let good = state
        .queries
        .get_most_expensive_baked_good()
        .await
        .inspect_err(|e| {
            if e.is_not_found() {
                tracing::warn!("no baked goods found");
            } else {
                tracing::error!(error = %e, "error fetching most expensive baked good");
            }
        })?;
    Ok(ok_one(baked_good_flat(&good)))
}

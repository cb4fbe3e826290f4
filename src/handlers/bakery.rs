//! Bakery handlers: list all (flat), read one (nested).

use crate::error::AppError;
use crate::response::{ok_many, ok_one};
use crate::serialize::{bakery_flat, bakery_nested};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list_bakeries(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bakeries = state.queries.list_bakeries().await.inspect_err(|e| {
        tracing::error!(error = %e, "error fetching bakeries");
    })?;
    Ok(ok_many(bakeries.iter().map(bakery_flat).collect()))
}

pub async fn get_bakery(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let bakery = state.queries.get_bakery(id).await.inspect_err(|e| {
        if e.is_not_found() {
            tracing::warn!(id, "bakery not found");
        } else {
            tracing::error!(id, error = %e, "error fetching bakery by id");
        }
    })?;
    Ok(ok_one(bakery_nested(&bakery)))
}

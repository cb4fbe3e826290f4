//! Operational endpoints for load balancers and deploy checks.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

impl HealthStatus {
    const fn alive() -> Self {
        Self {
            status: "ok",
            database: None,
        }
    }

    const fn store(reachable: bool) -> Self {
        if reachable {
            Self {
                status: "ok",
                database: Some("ok"),
            }
        } else {
            Self {
                status: "degraded",
                database: Some("unavailable"),
            }
        }
    }
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

const BUILD_INFO: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// Process is up; never touches the store.
async fn liveness() -> Json<HealthStatus> {
    Json(HealthStatus::alive())
}

/// 503 while the bakery store cannot answer a ping.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.queries.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::store(true))),
        Err(e) => {
            tracing::warn!(error = %e, "bakery store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthStatus::store(false)))
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BUILD_INFO)
}

/// `/health`, `/ready` and `/version`.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}

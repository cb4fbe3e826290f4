//! Bakery API server.
//!
//! Run from repo root: `cargo run -p bakery_server`
//! Pass `--seed` to replace the database contents with sample data before serving.

use bakery_api::{app, ensure_database_exists, ensure_tables, seed_sample_data, AppState, PgStore, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("bakery_api=info,bakery_server=info,tower_http=info")
            }),
        )
        .init();

    let seed = std::env::args().skip(1).any(|arg| arg == "--seed");

    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_tables(&pool).await?;
    if seed {
        seed_sample_data(&pool).await?;
    }

    let state = AppState::new(Arc::new(PgStore::new(pool)));
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Bakery API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

//! Bakery API: read-only REST endpoints over bakeries and their baked goods.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod serialize;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{BakedGood, BakedGoodWithBakery, Bakery, BakeryWithGoods, NewBakedGood, NewBakery};
pub use routes::{app, bakery_routes, common_routes_with_ready};
pub use service::QueryService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_tables, seed_sample_data, BakeryStore, InMemoryStore, PgStore,
};

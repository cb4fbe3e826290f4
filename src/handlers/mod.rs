//! HTTP handlers: landing page, bakeries, baked goods.

pub mod baked_good;
pub mod bakery;
pub use baked_good::*;
pub use bakery::*;

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html("<h1>Bakery GET API</h1>")
}

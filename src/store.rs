//! Storage seam. Every backend answers the same read queries with the same ordering:
//! bakeries and per-bakery goods by ascending id, the price listing by `price DESC, id ASC`.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::{ensure_database_exists, ensure_tables, seed_sample_data, PgStore};

use crate::error::AppError;
use crate::model::{BakedGoodWithBakery, Bakery, BakeryWithGoods};
use async_trait::async_trait;

#[async_trait]
pub trait BakeryStore: Send + Sync {
    /// Cheap round trip used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError>;

    /// The bakery and its goods read from one snapshot, so both halves agree.
    async fn find_bakery_with_goods(&self, id: i32) -> Result<Option<BakeryWithGoods>, AppError>;

    async fn baked_goods_by_price_desc(&self) -> Result<Vec<BakedGoodWithBakery>, AppError>;

    /// First row of [`BakeryStore::baked_goods_by_price_desc`]; lowest id wins a price tie.
    async fn most_expensive_baked_good(&self) -> Result<Option<BakedGoodWithBakery>, AppError>;
}

//! Read-only queries over bakeries and baked goods.

use crate::error::AppError;
use crate::model::{BakedGoodWithBakery, Bakery, BakeryWithGoods};
use crate::store::BakeryStore;
use std::sync::Arc;

pub const BAKERY_NOT_FOUND: &str = "Bakery not found";
pub const NO_BAKED_GOODS: &str = "No baked goods found";

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn BakeryStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn BakeryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn BakeryStore> {
        &self.store
    }

    /// All bakeries in primary-key order.
    pub async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError> {
        self.store.list_bakeries().await
    }

    /// One bakery with its owned goods, read together in a single store call.
    pub async fn get_bakery(&self, id: i32) -> Result<BakeryWithGoods, AppError> {
        self.store
            .find_bakery_with_goods(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BAKERY_NOT_FOUND.into()))
    }

    /// All goods, most expensive first; equal prices keep ascending id order.
    pub async fn list_baked_goods_by_price_desc(&self) -> Result<Vec<BakedGoodWithBakery>, AppError> {
        self.store.baked_goods_by_price_desc().await
    }

    pub async fn get_most_expensive_baked_good(&self) -> Result<BakedGoodWithBakery, AppError> {
        self.store
            .most_expensive_baked_good()
            .await?
            .ok_or_else(|| AppError::NotFound(NO_BAKED_GOODS.into()))
    }
}

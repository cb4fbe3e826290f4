//! In-memory backend for development and tests.

use super::BakeryStore;
use crate::error::AppError;
use crate::model::{BakedGood, BakedGoodWithBakery, Bakery, BakeryWithGoods, NewBakedGood, NewBakery};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    bakeries: BTreeMap<i32, Bakery>,
    baked_goods: BTreeMap<i32, BakedGood>,
    last_bakery_id: i32,
    last_baked_good_id: i32,
}

/// Rows keyed by id, so iteration order is primary-key order.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Storage("in-memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Storage("in-memory store lock poisoned".into()))
    }

    pub fn insert_bakery(&self, new: NewBakery) -> Result<Bakery, AppError> {
        require_name(&new.name)?;
        let mut tables = self.write()?;
        tables.last_bakery_id += 1;
        let bakery = Bakery {
            id: tables.last_bakery_id,
            name: new.name,
            created_at: Some(chrono::Utc::now().naive_utc()),
            updated_at: None,
        };
        tables.bakeries.insert(bakery.id, bakery.clone());
        tracing::debug!(id = bakery.id, name = %bakery.name, "inserted bakery");
        Ok(bakery)
    }

    /// Fails with `Validation` on an empty name or when `bakery_id` does not name an existing bakery.
    pub fn insert_baked_good(&self, new: NewBakedGood) -> Result<BakedGood, AppError> {
        require_name(&new.name)?;
        let mut tables = self.write()?;
        if !tables.bakeries.contains_key(&new.bakery_id) {
            return Err(AppError::Validation(format!(
                "bakery {} does not exist",
                new.bakery_id
            )));
        }
        tables.last_baked_good_id += 1;
        let good = BakedGood {
            id: tables.last_baked_good_id,
            name: new.name,
            price: new.price,
            created_at: Some(chrono::Utc::now().naive_utc()),
            updated_at: None,
            bakery_id: new.bakery_id,
        };
        tables.baked_goods.insert(good.id, good.clone());
        tracing::debug!(id = good.id, bakery_id = good.bakery_id, "inserted baked good");
        Ok(good)
    }

    /// Removes the bakery and every baked good it owns. Returns false if it did not exist.
    pub fn delete_bakery(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.bakeries.remove(&id).is_none() {
            return Ok(false);
        }
        tables.baked_goods.retain(|_, g| g.bakery_id != id);
        Ok(true)
    }

    fn goods_by_price_desc(tables: &Tables) -> Result<Vec<BakedGoodWithBakery>, AppError> {
        let mut rows = tables
            .baked_goods
            .values()
            .map(|good| -> Result<BakedGoodWithBakery, AppError> {
                let bakery = tables.bakeries.get(&good.bakery_id).ok_or_else(|| {
                    AppError::Storage(format!(
                        "baked good {} references missing bakery {}",
                        good.id, good.bakery_id
                    ))
                })?;
                Ok(BakedGoodWithBakery {
                    good: good.clone(),
                    bakery: bakery.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Stable sort over id order keeps the lowest id first among equal prices.
        rows.sort_by(|a, b| b.good.price.total_cmp(&a.good.price));
        Ok(rows)
    }
}

fn require_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl BakeryStore for InMemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }

    async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError> {
        Ok(self.read()?.bakeries.values().cloned().collect())
    }

    async fn find_bakery_with_goods(&self, id: i32) -> Result<Option<BakeryWithGoods>, AppError> {
        let tables = self.read()?;
        Ok(tables.bakeries.get(&id).map(|bakery| BakeryWithGoods {
            bakery: bakery.clone(),
            baked_goods: tables
                .baked_goods
                .values()
                .filter(|g| g.bakery_id == id)
                .cloned()
                .collect(),
        }))
    }

    async fn baked_goods_by_price_desc(&self) -> Result<Vec<BakedGoodWithBakery>, AppError> {
        let tables = self.read()?;
        Self::goods_by_price_desc(&tables)
    }

    async fn most_expensive_baked_good(&self) -> Result<Option<BakedGoodWithBakery>, AppError> {
        let tables = self.read()?;
        Ok(Self::goods_by_price_desc(&tables)?.into_iter().next())
    }
}

//! Bakery and baked good rows, plus the explicit join shapes the query layer hands out.

use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Bakery {
    pub id: i32,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BakedGood {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    /// Owning bakery. Lookup key only; the bakery row is resolved by query.
    pub bakery_id: i32,
}

/// A baked good together with its owning bakery, resolved by join.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedGoodWithBakery {
    pub good: BakedGood,
    pub bakery: Bakery,
}

/// A bakery with every baked good it owns, ordered by id.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeryWithGoods {
    pub bakery: Bakery,
    pub baked_goods: Vec<BakedGood>,
}

#[derive(Debug, Clone)]
pub struct NewBakery {
    pub name: String,
}

impl NewBakery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone)]
pub struct NewBakedGood {
    pub name: String,
    pub price: f64,
    pub bakery_id: i32,
}

impl NewBakedGood {
    pub fn new(name: impl Into<String>, price: f64, bakery_id: i32) -> Self {
        Self {
            name: name.into(),
            price,
            bakery_id,
        }
    }
}

/// Flat row produced by `baked_goods JOIN bakeries`; bakery columns carry a `bakery_` prefix.
#[derive(Debug, FromRow)]
pub(crate) struct BakedGoodJoinRow {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub bakery_id: i32,
    pub bakery_name: String,
    pub bakery_created_at: Option<NaiveDateTime>,
    pub bakery_updated_at: Option<NaiveDateTime>,
}

impl From<BakedGoodJoinRow> for BakedGoodWithBakery {
    fn from(row: BakedGoodJoinRow) -> Self {
        BakedGoodWithBakery {
            bakery: Bakery {
                id: row.bakery_id,
                name: row.bakery_name,
                created_at: row.bakery_created_at,
                updated_at: row.bakery_updated_at,
            },
            good: BakedGood {
                id: row.id,
                name: row.name,
                price: row.price,
                created_at: row.created_at,
                updated_at: row.updated_at,
                bakery_id: row.bakery_id,
            },
        }
    }
}

/// Row of `bakeries LEFT JOIN baked_goods`; good columns are null for a bakery with no goods.
#[derive(Debug, FromRow)]
pub(crate) struct BakeryGoodsRow {
    pub id: i32,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub good_id: Option<i32>,
    pub good_name: Option<String>,
    pub good_price: Option<f64>,
    pub good_created_at: Option<NaiveDateTime>,
    pub good_updated_at: Option<NaiveDateTime>,
}

impl BakeryWithGoods {
    /// Fold join rows (ordered by good id) for a single bakery. `None` when there are no rows.
    pub(crate) fn from_rows(rows: Vec<BakeryGoodsRow>) -> Option<Self> {
        let mut rows = rows.into_iter().peekable();
        let first = rows.peek()?;
        let bakery = Bakery {
            id: first.id,
            name: first.name.clone(),
            created_at: first.created_at,
            updated_at: first.updated_at,
        };
        let baked_goods = rows
            .filter_map(|row| {
                Some(BakedGood {
                    id: row.good_id?,
                    name: row.good_name?,
                    price: row.good_price?,
                    created_at: row.good_created_at,
                    updated_at: row.good_updated_at,
                    bakery_id: row.id,
                })
            })
            .collect();
        Some(BakeryWithGoods {
            bakery,
            baked_goods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(good: Option<(i32, &str, f64)>) -> BakeryGoodsRow {
        BakeryGoodsRow {
            id: 7,
            name: "Rolling Pin".into(),
            created_at: None,
            updated_at: None,
            good_id: good.map(|g| g.0),
            good_name: good.map(|g| g.1.to_string()),
            good_price: good.map(|g| g.2),
            good_created_at: None,
            good_updated_at: None,
        }
    }

    #[test]
    fn folds_join_rows_into_one_bakery() {
        let folded = BakeryWithGoods::from_rows(vec![
            row(Some((1, "Croissant", 3.5))),
            row(Some((2, "Cake", 20.0))),
        ])
        .unwrap();
        assert_eq!(folded.bakery.id, 7);
        assert_eq!(folded.bakery.name, "Rolling Pin");
        let names: Vec<&str> = folded.baked_goods.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Croissant", "Cake"]);
        assert!(folded.baked_goods.iter().all(|g| g.bakery_id == 7));
    }

    #[test]
    fn bakery_without_goods_has_empty_list() {
        let folded = BakeryWithGoods::from_rows(vec![row(None)]).unwrap();
        assert_eq!(folded.bakery.id, 7);
        assert!(folded.baked_goods.is_empty());
    }

    #[test]
    fn no_rows_means_no_bakery() {
        assert!(BakeryWithGoods::from_rows(Vec::new()).is_none());
    }
}

//! JSON views of bakeries and baked goods.
//!
//! Each entity/mode pair has its own view type. A serialization call expands at most one
//! relationship: a nested bakery lists its goods without their `bakery`, and a flat good
//! embeds its bakery without `baked_goods`.

use crate::model::{BakedGood, BakedGoodWithBakery, Bakery, BakeryWithGoods};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// `{id, name, created_at, updated_at}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BakeryView {
    pub id: i32,
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Flat bakery plus `baked_goods`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BakeryNestedView {
    #[serde(flatten)]
    pub bakery: BakeryView,
    pub baked_goods: Vec<BakedGoodInBakeryView>,
}

/// A good listed under its bakery; carries `bakery_id` but not the bakery itself.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BakedGoodInBakeryView {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub bakery_id: i32,
}

/// Flat good with its bakery embedded for context.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BakedGoodView {
    #[serde(flatten)]
    pub good: BakedGoodInBakeryView,
    pub bakery: BakeryView,
}

/// ISO-8601 without offset. Sub-second part is six digits (microseconds), left off when zero.
pub fn timestamp(value: Option<&NaiveDateTime>) -> Option<String> {
    value.map(|d| {
        if d.nanosecond() / 1_000 == 0 {
            d.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            d.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        }
    })
}

pub fn bakery_flat(bakery: &Bakery) -> BakeryView {
    BakeryView {
        id: bakery.id,
        name: bakery.name.clone(),
        created_at: timestamp(bakery.created_at.as_ref()),
        updated_at: timestamp(bakery.updated_at.as_ref()),
    }
}

pub fn bakery_nested(nested: &BakeryWithGoods) -> BakeryNestedView {
    BakeryNestedView {
        bakery: bakery_flat(&nested.bakery),
        baked_goods: nested.baked_goods.iter().map(baked_good_in_bakery).collect(),
    }
}

pub fn baked_good_in_bakery(good: &BakedGood) -> BakedGoodInBakeryView {
    BakedGoodInBakeryView {
        id: good.id,
        name: good.name.clone(),
        price: good.price,
        created_at: timestamp(good.created_at.as_ref()),
        updated_at: timestamp(good.updated_at.as_ref()),
        bakery_id: good.bakery_id,
    }
}

pub fn baked_good_flat(row: &BakedGoodWithBakery) -> BakedGoodView {
    BakedGoodView {
        good: baked_good_in_bakery(&row.good),
        bakery: bakery_flat(&row.bakery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn at(h: u32, m: u32, s: u32, micros: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micros)
            .unwrap()
    }

    fn rolling_pin() -> Bakery {
        Bakery {
            id: 1,
            name: "Rolling Pin".into(),
            created_at: Some(at(8, 30, 0, 0)),
            updated_at: None,
        }
    }

    fn cake() -> BakedGood {
        BakedGood {
            id: 2,
            name: "Cake".into(),
            price: 20.0,
            created_at: Some(at(9, 15, 2, 123456)),
            updated_at: None,
            bakery_id: 1,
        }
    }

    #[test]
    fn timestamps_render_iso_or_null() {
        assert_eq!(timestamp(Some(&at(8, 30, 0, 0))).as_deref(), Some("2024-03-09T08:30:00"));
        assert_eq!(
            timestamp(Some(&at(9, 15, 2, 123456))).as_deref(),
            Some("2024-03-09T09:15:02.123456")
        );
        assert_eq!(timestamp(None), None);
    }

    #[test]
    fn fractional_seconds_keep_six_digits() {
        assert_eq!(
            timestamp(Some(&at(9, 15, 2, 120000))).as_deref(),
            Some("2024-03-09T09:15:02.120000")
        );
        assert_eq!(
            timestamp(Some(&at(9, 15, 2, 1))).as_deref(),
            Some("2024-03-09T09:15:02.000001")
        );
    }

    #[test]
    fn flat_bakery_has_scalars_only() {
        let v = serde_json::to_value(bakery_flat(&rolling_pin())).unwrap();
        assert_eq!(
            v,
            json!({
                "id": 1,
                "name": "Rolling Pin",
                "created_at": "2024-03-09T08:30:00",
                "updated_at": null
            })
        );
    }

    #[test]
    fn flat_good_embeds_bakery_without_goods() {
        let row = BakedGoodWithBakery {
            good: cake(),
            bakery: rolling_pin(),
        };
        let v = serde_json::to_value(baked_good_flat(&row)).unwrap();
        assert_eq!(v["id"], 2);
        assert_eq!(v["price"], 20.0);
        assert_eq!(v["bakery_id"], 1);
        assert_eq!(v["bakery"]["name"], "Rolling Pin");
        let bakery = v["bakery"].as_object().unwrap();
        assert!(!bakery.contains_key("baked_goods"));
    }

    #[test]
    fn nested_bakery_goods_omit_back_reference() {
        let nested = BakeryWithGoods {
            bakery: rolling_pin(),
            baked_goods: vec![cake()],
        };
        let v = serde_json::to_value(bakery_nested(&nested)).unwrap();
        assert_eq!(v["name"], "Rolling Pin");
        let goods = v["baked_goods"].as_array().unwrap();
        assert_eq!(goods.len(), 1);
        let good = goods[0].as_object().unwrap();
        assert_eq!(good.get("bakery_id"), Some(&Value::from(1)));
        assert!(!good.contains_key("bakery"));
    }
}

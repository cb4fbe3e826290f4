//! Runs the Postgres store against a live server. The database named by
//! `BAKERY_TEST_DATABASE_URL` is wiped and reseeded, so point it at a scratch database:
//!
//! `BAKERY_TEST_DATABASE_URL=postgres://localhost/bakeries_test cargo test --test postgres -- --ignored`

use bakery_api::{ensure_database_exists, ensure_tables, seed_sample_data, BakeryStore, PgStore};
use sqlx::postgres::PgPoolOptions;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::test]
#[ignore] // Needs a running PostgreSQL server; see module docs
async fn seeded_database_answers_every_query() -> TestResult {
    let Ok(url) = std::env::var("BAKERY_TEST_DATABASE_URL") else {
        eprintln!("BAKERY_TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };
    ensure_database_exists(&url).await?;
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    ensure_tables(&pool).await?;
    // Running bootstrap twice must be harmless.
    ensure_tables(&pool).await?;
    seed_sample_data(&pool).await?;
    let store = PgStore::new(pool.clone());

    store.ping().await?;

    let bakeries = store.list_bakeries().await?;
    assert_eq!(bakeries.len(), 3);
    assert!(bakeries.windows(2).all(|w| w[0].id < w[1].id));
    assert!(bakeries.iter().all(|b| b.created_at.is_some()));

    let rolling_pin = bakeries
        .iter()
        .find(|b| b.name == "Rolling Pin")
        .ok_or("Rolling Pin not seeded")?;
    let nested = store
        .find_bakery_with_goods(rolling_pin.id)
        .await?
        .ok_or("Rolling Pin missing")?;
    assert_eq!(&nested.bakery, rolling_pin);
    let names: Vec<&str> = nested.baked_goods.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Croissant", "Cake", "Baguette"]);
    assert!(nested.baked_goods.iter().all(|g| g.bakery_id == rolling_pin.id));

    let by_price = store.baked_goods_by_price_desc().await?;
    assert_eq!(by_price.len(), 7);
    assert!(by_price.windows(2).all(|w| w[0].good.price >= w[1].good.price));
    assert!(by_price.iter().all(|r| r.bakery.id == r.good.bakery_id));

    let top = store.most_expensive_baked_good().await?.ok_or("no goods")?;
    assert_eq!(top.good.name, "Cake");
    assert_eq!(top.good.price, 20.0);
    assert_eq!(top.bakery.name, "Rolling Pin");

    let max_id: (i32,) = sqlx::query_as("SELECT COALESCE(MAX(id), 0) FROM bakeries")
        .fetch_one(&pool)
        .await?;
    assert!(store.find_bakery_with_goods(max_id.0 + 1).await?.is_none());

    // A bakery with no goods still comes back, with an empty list.
    let (empty_id,): (i32,) = sqlx::query_as("INSERT INTO bakeries (name) VALUES ('Empty') RETURNING id")
        .fetch_one(&pool)
        .await?;
    let empty = store.find_bakery_with_goods(empty_id).await?.ok_or("Empty missing")?;
    assert!(empty.baked_goods.is_empty());

    // Names must be non-empty.
    let rejected = sqlx::query("INSERT INTO bakeries (name) VALUES ('')")
        .execute(&pool)
        .await;
    assert!(rejected.is_err());

    // Deleting a bakery removes its goods.
    sqlx::query("DELETE FROM bakeries WHERE id = $1")
        .bind(rolling_pin.id)
        .execute(&pool)
        .await?;
    let (orphans,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM baked_goods WHERE bakery_id = $1")
        .bind(rolling_pin.id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(orphans, 0);
    let top = store.most_expensive_baked_good().await?.ok_or("no goods")?;
    assert_eq!(top.good.name, "Cheesecake");

    Ok(())
}

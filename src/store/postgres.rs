//! PostgreSQL backend: table bootstrap, sample data, and the read queries.

use super::BakeryStore;
use crate::error::{AppError, ConfigError};
use crate::model::{BakedGoodJoinRow, BakedGoodWithBakery, Bakery, BakeryGoodsRow, BakeryWithGoods};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const BAKERY_COLUMNS: &str = "id, name, created_at, updated_at";

const BAKERY_WITH_GOODS_SELECT: &str = r#"
    SELECT b.id, b.name, b.created_at, b.updated_at,
           g.id AS good_id,
           g.name AS good_name,
           g.price AS good_price,
           g.created_at AS good_created_at,
           g.updated_at AS good_updated_at
    FROM bakeries b
    LEFT JOIN baked_goods g ON g.bakery_id = b.id
    WHERE b.id = $1
    ORDER BY g.id ASC
"#;

const BAKED_GOOD_JOIN_SELECT: &str = r#"
    SELECT g.id, g.name, g.price, g.created_at, g.updated_at, g.bakery_id,
           b.name AS bakery_name,
           b.created_at AS bakery_created_at,
           b.updated_at AS bakery_updated_at
    FROM baked_goods g
    JOIN bakeries b ON b.id = g.bakery_id
    ORDER BY g.price DESC, g.id ASC
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BakeryStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError> {
        let sql = format!("SELECT {} FROM bakeries ORDER BY id", BAKERY_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Bakery>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_bakery_with_goods(&self, id: i32) -> Result<Option<BakeryWithGoods>, AppError> {
        tracing::debug!(sql = %BAKERY_WITH_GOODS_SELECT, id, "query");
        let rows = sqlx::query_as::<_, BakeryGoodsRow>(BAKERY_WITH_GOODS_SELECT)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(BakeryWithGoods::from_rows(rows))
    }

    async fn baked_goods_by_price_desc(&self) -> Result<Vec<BakedGoodWithBakery>, AppError> {
        tracing::debug!(sql = %BAKED_GOOD_JOIN_SELECT, "query");
        let rows = sqlx::query_as::<_, BakedGoodJoinRow>(BAKED_GOOD_JOIN_SELECT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BakedGoodWithBakery::from).collect())
    }

    async fn most_expensive_baked_good(&self) -> Result<Option<BakedGoodWithBakery>, AppError> {
        let sql = format!("{} LIMIT 1", BAKED_GOOD_JOIN_SELECT.trim_end());
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, BakedGoodJoinRow>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(BakedGoodWithBakery::from))
    }
}

/// Create `bakeries` and `baked_goods` if they do not exist. Deleting a bakery cascades to its goods.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bakeries (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            created_at TIMESTAMP DEFAULT NOW(),
            updated_at TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS baked_goods (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            price DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMP DEFAULT NOW(),
            updated_at TIMESTAMP,
            bakery_id INTEGER NOT NULL,
            CONSTRAINT fk_baked_goods_bakery_id_bakeries
                FOREIGN KEY (bakery_id) REFERENCES bakeries (id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS ix_baked_goods_bakery_id ON baked_goods (bakery_id)")
        .execute(pool)
        .await?;
    Ok(())
}

const SAMPLE_BAKERIES: &[(&str, &[(&str, f64)])] = &[
    (
        "Rolling Pin",
        &[("Croissant", 3.5), ("Cake", 20.0), ("Baguette", 4.25)],
    ),
    ("Delightful donuts", &[("Chocolate dipped donut", 2.75), ("Apple fritter", 4.0)]),
    ("Incredible crullers", &[("Glazed cruller", 3.0), ("Cheesecake", 18.5)]),
];

/// Replace all rows with a small fixed dataset. Runs in one transaction.
pub async fn seed_sample_data(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    // Cascade clears baked_goods.
    sqlx::query("DELETE FROM bakeries").execute(&mut *tx).await?;
    for (bakery_name, goods) in SAMPLE_BAKERIES {
        let (bakery_id,): (i32,) =
            sqlx::query_as("INSERT INTO bakeries (name) VALUES ($1) RETURNING id")
                .bind(*bakery_name)
                .fetch_one(&mut *tx)
                .await?;
        for (name, price) in goods.iter() {
            sqlx::query("INSERT INTO baked_goods (name, price, bakery_id) VALUES ($1, $2, $3)")
                .bind(*name)
                .bind(*price)
                .bind(bakery_id)
                .execute(&mut *tx)
                .await?;
        }
    }
    tx.commit().await?;
    tracing::info!(bakeries = SAMPLE_BAKERIES.len(), "seeded sample data");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database if missing.
/// Host, port, credentials and TLS settings come from `database_url` unchanged.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_connect_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance connection plus the database to create.
/// `None` when the URL names no database, or names `postgres` itself.
fn admin_connect_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        message: e.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

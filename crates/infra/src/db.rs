//! Database bootstrap: pool creation and schema setup.

use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

use crate::config::DatabaseConfig;
use crate::store::{PostgresProductStore, StoreError, map_sqlx_error};

/// DDL for the product table. Idempotent.
pub const CREATE_PRODUCT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS product (
        id          SERIAL PRIMARY KEY,
        name        VARCHAR(100) NOT NULL,
        description VARCHAR(250) NOT NULL,
        price       NUMERIC(10, 2) NOT NULL,
        available   BOOLEAN NOT NULL DEFAULT TRUE,
        category    VARCHAR(32) NOT NULL DEFAULT 'UNKNOWN'
    )
"#;

/// Connect to Postgres, make sure the schema exists, and hand back a store.
#[instrument(skip(config), fields(max_connections = config.max_connections, testing = config.testing), err)]
pub async fn init_db(config: &DatabaseConfig) -> Result<PostgresProductStore, StoreError> {
    if config.testing {
        tracing::info!("Initializing database (test mode)");
    } else {
        tracing::info!("Initializing database");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;

    sqlx::query(CREATE_PRODUCT_TABLE)
        .execute(&pool)
        .await
        .map_err(|e| map_sqlx_error("create_product_table", e))?;

    Ok(PostgresProductStore::new(pool))
}

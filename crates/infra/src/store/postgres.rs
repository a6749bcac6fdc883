//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError::Database`, tagged with the operation
//! name. Nothing is retried. Validation failures never reach the database.
//!
//! ## Thread Safety
//!
//! `PostgresProductStore` is `Send + Sync` and cheap to clone; every operation
//! checks a connection out of the shared SQLx pool and returns it afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{Category, Product};

use super::{ProductStore, StoreError};

macro_rules! select_product {
    ($tail:literal) => {
        concat!(
            "SELECT id, name, description, price, available, category FROM product ",
            $tail
        )
    };
}

/// Product store over a `product` table (see `db::CREATE_PRODUCT_TABLE`).
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    /// Create a new PostgresProductStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError> {
        tracing::info!("Creating {}", product.name);

        let row = sqlx::query(
            r#"
            INSERT INTO product (name, description, price, available, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        let id: i32 = row
            .try_get("id")
            .map_err(|e| StoreError::database("insert", format!("failed to read id: {e}")))?;
        Ok(ProductId::new(id))
    }

    #[instrument(skip(self, product), fields(name = %product.name, id = ?product.id), err)]
    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let id = product.require_id()?;
        tracing::info!("Saving {}", product.name);

        sqlx::query(
            r#"
            UPDATE product
            SET name = $2, description = $3, price = $4, available = $5, category = $6
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        tracing::info!("Processing all Products");

        let rows = sqlx::query(select_product!("ORDER BY id ASC"))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("all", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        tracing::info!("Processing lookup for id {} ...", id);

        let row = sqlx::query(select_product!("WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find", e))?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        tracing::info!("Processing name query for {} ...", name);
        let rows = sqlx::query(select_product!("WHERE name = $1 ORDER BY id ASC"))
            .bind(name)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_name", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError> {
        tracing::info!("Processing available query for {} ...", available);
        let rows = sqlx::query(select_product!("WHERE available = $1 ORDER BY id ASC"))
            .bind(available)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_availability", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError> {
        tracing::info!("Processing category query for {} ...", category);
        let rows = sqlx::query(select_product!("WHERE category = $1 ORDER BY id ASC"))
            .bind(category.as_str())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_category", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_exact_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(select_product!("WHERE price = $1 ORDER BY id ASC"))
            .bind(price)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_price", e))?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self), err)]
    async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM product")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear", e))?;
        Ok(result.rows_affected())
    }
}

// SQLx row types

#[derive(Debug)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    available: bool,
    category: String,
}

impl<'r> FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            available: row.try_get("available")?,
            category: row.try_get("category")?,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<Category>().map_err(|_| {
            StoreError::database("decode", format!("unknown category '{}' in row {}", row.category, row.id))
        })?;

        Ok(Product {
            id: Some(ProductId::new(row.id)),
            name: row.name,
            description: row.description,
            price: row.price,
            available: row.available,
            category,
        })
    }
}

fn row_to_product(row: &sqlx::postgres::PgRow) -> Result<Product, StoreError> {
    let row = ProductRow::from_row(row)
        .map_err(|e| StoreError::database("decode", format!("failed to deserialize product row: {e}")))?;
    Product::try_from(row)
}

pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = match db_err.code() {
                Some(code) => format!("{} (code {})", db_err.message(), code),
                None => db_err.message().to_string(),
            };
            StoreError::database(operation, message)
        }
        sqlx::Error::PoolClosed => StoreError::database(operation, "connection pool closed"),
        sqlx::Error::RowNotFound => StoreError::database(operation, "unexpected row not found"),
        _ => StoreError::database(operation, err.to_string()),
    }
}

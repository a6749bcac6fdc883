use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rust_decimal::Decimal;

use catalog_core::ProductId;
use catalog_products::{Category, PriceQuery, Product};

use super::StoreError;

/// Persistent product storage.
///
/// Each call is its own unit of work. Query results are ordered by id.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row and return the identifier storage assigned to it.
    ///
    /// Any id already set on `product` is ignored.
    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError>;

    /// Overwrite the row keyed by `product.id`.
    ///
    /// Fails with a validation error when the product has no id. Updating an
    /// id with no row is a no-op.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    /// Remove the row with this id. Removing an absent row is a no-op.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;

    async fn all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError>;

    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError>;

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError>;

    /// Exact decimal match (`12.5` matches `12.50`).
    async fn find_by_exact_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError>;

    /// Price lookup accepting either a decimal or its text form.
    async fn find_by_price(&self, price: PriceQuery) -> Result<Vec<Product>, StoreError> {
        tracing::info!("Processing price query for {:?} ...", price);
        let price = price.resolve()?;
        self.find_by_exact_price(price).await
    }

    /// Remove every row, returning how many were removed.
    async fn clear(&self) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError> {
        (**self).insert(product).await
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).all().await
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_availability(available).await
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_category(category).await
    }

    async fn find_by_exact_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_exact_price(price).await
    }

    async fn find_by_price(&self, price: PriceQuery) -> Result<Vec<Product>, StoreError> {
        (**self).find_by_price(price).await
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        (**self).clear().await
    }
}

#[derive(Debug, Default)]
struct Rows {
    products: BTreeMap<ProductId, Product>,
    // Never rewound, so ids are not reused after delete or clear.
    last_id: i32,
}

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Rows>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Rows>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::database("read", "lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Rows>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::database("write", "lock poisoned"))
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<Product>, StoreError>
    where
        F: Fn(&Product) -> bool,
    {
        let rows = self.read()?;
        Ok(rows
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError> {
        let mut rows = self.write()?;
        let next = rows
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::database("insert", "id space exhausted"))?;
        rows.last_id = next;
        let id = ProductId::new(next);

        let mut stored = product.clone();
        stored.id = Some(id);
        rows.products.insert(id, stored);
        Ok(id)
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let id = product.require_id()?;
        let mut rows = self.write()?;
        if let Some(existing) = rows.products.get_mut(&id) {
            *existing = product.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        self.write()?.products.remove(&id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Product>, StoreError> {
        self.select(|_| true)
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        self.select(|p| p.name == name)
    }

    async fn find_by_availability(&self, available: bool) -> Result<Vec<Product>, StoreError> {
        self.select(|p| p.available == available)
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Product>, StoreError> {
        self.select(|p| p.category == category)
    }

    async fn find_by_exact_price(&self, price: Decimal) -> Result<Vec<Product>, StoreError> {
        self.select(|p| p.price == price)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut rows = self.write()?;
        let removed = rows.products.len() as u64;
        rows.products.clear();
        Ok(removed)
    }
}

//! Instance-level persistence for products.
//!
//! `ProductRecord` lets a `Product` save itself through any `ProductStore`:
//!
//! ```ignore
//! let mut product = Product::new("Fedora", "A red hat", price, true, Category::Cloths);
//! product.create(&store).await?;   // transient -> persisted, id assigned
//! product.description = "A blue hat".into();
//! product.update(&store).await?;   // persisted -> persisted
//! product.delete(&store).await?;   // persisted -> deleted
//! ```

use async_trait::async_trait;

use catalog_products::Product;

use crate::store::{ProductStore, StoreError};

#[async_trait]
pub trait ProductRecord {
    /// Insert as a new row and take the storage-assigned id.
    async fn create<S>(&mut self, store: &S) -> Result<(), StoreError>
    where
        S: ProductStore + ?Sized;

    /// Persist current fields to the row matched by id.
    async fn update<S>(&self, store: &S) -> Result<(), StoreError>
    where
        S: ProductStore + ?Sized;

    /// Remove the row matched by id. The in-memory value is left as is.
    async fn delete<S>(&self, store: &S) -> Result<(), StoreError>
    where
        S: ProductStore + ?Sized;
}

#[async_trait]
impl ProductRecord for Product {
    async fn create<S>(&mut self, store: &S) -> Result<(), StoreError>
    where
        S: ProductStore + ?Sized,
    {
        self.validate()?;
        tracing::info!("Creating {}", self.name);

        // Storage owns id assignment; any id already set is replaced.
        let id = store.insert(self).await?;
        self.id = Some(id);
        Ok(())
    }

    async fn update<S>(&self, store: &S) -> Result<(), StoreError>
    where
        S: ProductStore + ?Sized,
    {
        tracing::info!("Saving {}", self.name);
        self.require_id()?;
        self.validate()?;
        store.update(self).await
    }

    async fn delete<S>(&self, store: &S) -> Result<(), StoreError>
    where
        S: ProductStore + ?Sized,
    {
        tracing::info!("Deleting {}", self.name);
        match self.id {
            Some(id) => store.delete(id).await,
            None => Ok(()),
        }
    }
}

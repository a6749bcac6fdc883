//! Product storage abstractions and backends.

pub mod postgres;
pub mod product_store;

pub use postgres::PostgresProductStore;
pub use product_store::{InMemoryProductStore, ProductStore};

pub(crate) use postgres::map_sqlx_error;

use thiserror::Error;

use catalog_core::DataValidationError;

/// Storage operation error.
///
/// `Validation` is a caller bug (bad input, update without an id). The other
/// variants are infrastructure failures and are passed through untranslated.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] DataValidationError),

    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn database(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Database {
            operation,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

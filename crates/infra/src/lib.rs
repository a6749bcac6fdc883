//! Infrastructure layer: storage backends, database configuration, bootstrap.

pub mod config;
pub mod db;
pub mod record;
pub mod store;

pub use config::DatabaseConfig;
pub use db::init_db;
pub use record::ProductRecord;
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};

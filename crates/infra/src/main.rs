//! Schema bootstrap: connects with the environment's settings and creates
//! the product table if it is missing.

use anyhow::Context;

use catalog_infra::{DatabaseConfig, ProductStore, init_db};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env().context("failed to load database configuration")?;
    catalog_observability::init_with_default(config.default_log_filter());

    let store = init_db(&config)
        .await
        .context("failed to initialize the product database")?;

    let count = store.all().await.context("failed to list products")?.len();
    tracing::info!(products = count, "product table ready");

    store.close().await;
    Ok(())
}

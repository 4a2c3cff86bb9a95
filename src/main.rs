//! biztime server binary
//!
//! Usage: `biztime [config.yaml]`. Without an argument the file named by
//! `BIZTIME_CONFIG` is used, or built-in defaults if that is unset too.

use anyhow::Result;
use biztime::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(std::env::args().nth(1))?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = PostgresStore::connect(&config.database).await?;
    if config.database.run_migrations {
        store.migrate().await?;
    }

    let addr = config.server.bind_address();
    tracing::info!("Starting biztime v{}", env!("CARGO_PKG_VERSION"));

    ServerBuilder::new()
        .with_store(store)
        .with_server_config(config.server)
        .serve(&addr)
        .await
}

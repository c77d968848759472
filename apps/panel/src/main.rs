//! # Vitrina Panel
//!
//! Process entry point for the storefront reads and admin writes.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Panel Process                                    │
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG or "info,vitrina=debug,sqlx=warn"  │
//! │  2. PanelConfig::load()     environment variables                      │
//! │  3. Clients, created once:                                             │
//! │       Database (SQLite pool, migrations)                               │
//! │       Cache: RedisCache if REDIS_URL, else MemoryCache                 │
//! │       FsAssetStore (VITRINA_ASSET_DIR served at VITRINA_ASSET_BASE_URL)│
//! │  4. Services::new(clients)  injected, never global                     │
//! │  5. commands::run(command)                                             │
//! │  6. Database::close()                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! vitrina-panel home
//! vitrina-panel buy 5
//! vitrina-panel slide upsert --id 2 --image-file wide.png
//! vitrina-panel about --title "About us"
//! ```

mod cli;
mod commands;
mod config;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vitrina_content::{FsAssetStore, MemoryCache, RedisCache};
use vitrina_core::{Cache, Repository};
use vitrina_db::{Database, DbConfig};

use crate::cli::Cli;
use crate::commands::Services;
use crate::config::PanelConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = PanelConfig::load()?;
    info!(
        db_path = %config.db_path.display(),
        redis = config.redis_url.is_some(),
        asset_dir = %config.asset_dir.display(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.db_path)).await?;
    let cache = connect_cache(&config).await;
    let store = FsAssetStore::new(&config.asset_dir, &config.asset_base_url)?;

    let repo: Arc<dyn Repository> = Arc::new(db.clone());
    let services = Services::new(repo, cache, Arc::new(store), config.cache_ttl);

    let result = commands::run(cli.command, &services).await;

    db.close().await;
    result
}

/// Redis when configured and reachable, otherwise the in-process cache.
async fn connect_cache(config: &PanelConfig) -> Arc<dyn Cache> {
    if let Some(ref redis_url) = config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(cache) => return Arc::new(cache),
            Err(e) => warn!(error = %e, "Failed to connect to Redis, using in-process cache"),
        }
    }
    Arc::new(MemoryCache::new())
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitrina=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! Database connection and store construction
//!
//! Builds the PostgreSQL pool behind [`PgDocumentStore`], or an in-memory
//! store when configured for local runs.

use crate::config::{DatabaseConfig, StoreBackend};
use crate::store::{DocumentStore, MemoryStore, PgDocumentStore};
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Pool tuning
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,  // 10 minutes
            max_lifetime_secs: 1800, // 30 minutes
        }
    }
}

/// Create a PostgreSQL connection pool
pub async fn create_pool(database_url: &str, options: &PoolOptions) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(database_url)
        .context("Invalid database URL")?
        .application_name("assist-ai");

    let pool = PgPoolOptions::new()
        .max_connections(options.max_connections)
        .min_connections(options.min_connections.min(options.max_connections))
        .acquire_timeout(Duration::from_secs(options.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(options.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(options.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    info!(
        max = options.max_connections,
        min = options.min_connections,
        "Database pool created"
    );

    Ok(pool)
}

/// Run embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Build the document store selected by configuration
///
/// Migrations run on startup unless `run_migrations` is false (production
/// deployments use a separate migration job).
pub async fn connect_store(
    config: &DatabaseConfig,
    run_migrations_on_start: bool,
) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let options = PoolOptions {
                max_connections: config.max_connections,
                ..Default::default()
            };
            let pool = create_pool(&config.url, &options).await?;
            if run_migrations_on_start {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
    }
}

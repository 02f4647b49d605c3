pub mod config;
pub mod operations;
pub mod schema;

use std::time::{Duration, Instant};

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use thiserror::Error;

use crate::db::config::{DbBackend, DbConfig};

#[derive(Clone)]
pub struct DatabaseProxy {
    config: DbConfig,
    pool: AnyPool,
}

impl DatabaseProxy {
    pub async fn connect(config: DbConfig) -> Result<Self, DbInitError> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        let proxy = Self { config, pool };

        if proxy.config.init_schema {
            schema::apply(&proxy).await?;
            tracing::info!(backend = ?proxy.backend(), "database schema ensured");
        }

        Ok(proxy)
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> DbBackend {
        self.config.backend
    }

    /// Round-trip latency of a trivial query, or the error that prevented it.
    pub async fn ping(&self, timeout: Duration) -> Result<Duration, String> {
        let started = Instant::now();
        match tokio::time::timeout(timeout, sqlx::query("SELECT 1").execute(&self.pool)).await {
            Ok(Ok(_)) => Ok(started.elapsed()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(_) => Err("timeout".to_string()),
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[derive(Debug, Error)]
pub enum DbInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

use std::time::Duration;

use crate::config::env_bool;

const SQLITE_DEV_URL: &str = "sqlite:database/sqlite/dev.sqlite3?mode=rwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Postgres,
    Sqlite,
}

impl DbBackend {
    pub fn detect(url: &str) -> Self {
        if url.starts_with("sqlite:") {
            DbBackend::Sqlite
        } else {
            DbBackend::Postgres
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub backend: DbBackend,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub init_schema: bool,
}

impl DbConfig {
    /// Returns `None` when neither `DATABASE_URL` nor `USE_SQLITE=true` is set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                env_bool("USE_SQLITE")
                    .filter(|enabled| *enabled)
                    .map(|_| SQLITE_DEV_URL.to_string())
            })?;

        let config = Self::new(url)
            .with_max_connections(env_u32("DB_MAX_CONNECTIONS", 5))
            .with_init_schema(env_bool("DB_INIT_SCHEMA").unwrap_or(false));
        Some(config)
    }

    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            backend: DbBackend::detect(&url),
            url,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            init_schema: false,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_init_schema(mut self, init_schema: bool) -> Self {
        self.init_schema = init_schema;
        self
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

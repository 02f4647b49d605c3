use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::db::config::DbConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_LOG_DIR: &str = "./logs";

/// Where lessons and quizzes are read from. A deployment uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Database,
    Files,
}

impl ContentSource {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Some(Self::Database),
            "files" | "file" | "json" => Some(Self::Files),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Files => "files",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Directory for rolling log files; `None` logs to stdout only.
    pub log_dir: Option<PathBuf>,
    pub source: ContentSource,
    pub data_dir: PathBuf,
    pub database: Option<DbConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown CONTENT_SOURCE value: {0}")]
    UnknownSource(String),
    #[error("CONTENT_SOURCE=database requires DATABASE_URL or USE_SQLITE=true")]
    MissingDatabase,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env_bool("ENABLE_FILE_LOGS")
            .unwrap_or(false)
            .then(|| {
                std::env::var("LOG_DIR")
                    .ok()
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
            });

        let data_dir = std::env::var("DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let database = DbConfig::from_env();

        let source = match std::env::var("CONTENT_SOURCE") {
            Ok(raw) if !raw.trim().is_empty() => {
                ContentSource::parse(&raw).ok_or(ConfigError::UnknownSource(raw))?
            }
            _ if database.is_some() => ContentSource::Database,
            _ => ContentSource::Files,
        };

        if source == ContentSource::Database && database.is_none() {
            return Err(ConfigError::MissingDatabase);
        }

        Ok(Self {
            host,
            port,
            log_level,
            log_dir,
            source,
            data_dir,
            database,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    match normalized.as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

pub mod cache;
pub mod config;
pub mod db;
pub mod logging;
pub mod render;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ContentSource};
use crate::db::{DatabaseProxy, DbInitError};
use crate::state::AppState;
use crate::store::{ContentError, ContentStore, DatabaseStore, FileStore};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database initialization failed: {0}")]
    Database(#[from] DbInitError),
    #[error("data directory setup failed: {0}")]
    DataDir(#[from] ContentError),
    #[error("CONTENT_SOURCE=database but no database is configured")]
    MissingDatabase,
}

/// Opens the content backend selected by `config`.
pub async fn open_store(config: &Config) -> Result<ContentStore, StartupError> {
    match config.source {
        ContentSource::Database => {
            let db_config = config
                .database
                .clone()
                .ok_or(StartupError::MissingDatabase)?;
            let proxy = DatabaseProxy::connect(db_config).await?;
            tracing::info!(backend = ?proxy.backend(), "reading content from database");
            Ok(ContentStore::Database(DatabaseStore::new(proxy)))
        }
        ContentSource::Files => {
            let store = FileStore::new(config.data_dir.clone());
            store.ensure_layout().await?;
            tracing::info!(data_dir = %store.root().display(), "reading content from JSON files");
            Ok(ContentStore::Files(store))
        }
    }
}

pub fn build_app(store: ContentStore) -> axum::Router {
    routes::router(AppState::new(store)).layer(TraceLayer::new_for_http())
}

pub async fn create_app(config: &Config) -> Result<axum::Router, StartupError> {
    let store = open_store(config).await?;
    Ok(build_app(store))
}

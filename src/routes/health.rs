use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;
use crate::store::ContentStore;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<DatabaseStatus>,
    cached_entries: usize,
    start_time: String,
    uptime: u64,
    timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseStatus {
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Response {
    let content = state.content();

    let database = match content.store() {
        ContentStore::Database(store) => Some(match store.proxy().ping(DB_PING_TIMEOUT).await {
            Ok(latency) => DatabaseStatus {
                connected: true,
                latency_ms: Some(latency.as_millis() as u64),
                error: None,
            },
            Err(error) => DatabaseStatus {
                connected: false,
                latency_ms: None,
                error: Some(error),
            },
        }),
        ContentStore::Files(_) => None,
    };

    let ok = database.as_ref().map_or(true, |db| db.connected);
    let response = HealthResponse {
        status: if ok { "ok" } else { "degraded" },
        store: content.store().source().as_str(),
        database,
        cached_entries: content.cache_stats().total_entries(),
        start_time: DateTime::<Utc>::from(state.started_at_system())
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.uptime_seconds(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let status_code = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(response)).into_response()
}

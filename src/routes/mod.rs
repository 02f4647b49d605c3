mod health;
mod lessons;
mod quiz;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(lessons::manifest).fallback(fallback_handler))
        .route(
            "/lesson/:id",
            get(lessons::lesson_detail).fallback(fallback_handler),
        )
        .route(
            "/quiz/:id",
            get(quiz::show).post(quiz::submit).fallback(fallback_handler),
        )
        .route("/health", get(health::health))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("The page you asked for does not exist.").into_response()
}

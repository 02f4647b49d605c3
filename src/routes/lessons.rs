use axum::extract::{Path, State};
use axum::response::Html;

use crate::render;
use crate::response::AppError;
use crate::state::AppState;

pub async fn manifest(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let lessons = state
        .content()
        .manifest()
        .await
        .map_err(|err| AppError::from_content(err, || AppError::not_found("No lessons available")))?;

    Ok(Html(render::manifest_page(&lessons)))
}

pub async fn lesson_detail(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let content = state.content();

    let lesson = content
        .lesson(&lesson_id)
        .await
        .map_err(|err| AppError::from_content(err, AppError::lesson_not_found))?
        .ok_or_else(AppError::lesson_not_found)?;

    let has_quiz = match content.has_quiz(&lesson_id).await {
        Ok(exists) => exists,
        Err(err) => {
            tracing::warn!(error = %err, lesson_id = %lesson_id, "quiz availability check failed");
            false
        }
    };

    Ok(Html(render::lesson_page(&lesson, has_quiz)))
}

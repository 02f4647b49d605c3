use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Form;

use crate::render::{self, QuizResult};
use crate::response::AppError;
use crate::services::grading;
use crate::state::AppState;
use crate::store::Question;

async fn load_questions(state: &AppState, lesson_id: &str) -> Result<Arc<[Question]>, AppError> {
    state
        .content()
        .quiz(lesson_id)
        .await
        .map_err(|err| AppError::from_content(err, AppError::quiz_not_found))?
        .ok_or_else(AppError::quiz_not_found)
}

pub async fn show(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let questions = load_questions(&state, &lesson_id).await?;
    Ok(Html(render::quiz_page(&lesson_id, &questions, None)))
}

pub async fn submit(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let questions = load_questions(&state, &lesson_id).await?;

    // An unreadable body grades as a blank submission.
    let submitted = match form {
        Ok(Form(submitted)) => submitted,
        Err(rejection) => {
            tracing::debug!(lesson_id = %lesson_id, error = %rejection, "unreadable quiz submission");
            HashMap::new()
        }
    };

    let (grade, outcomes) = grading::grade_detailed(&questions, &submitted);
    tracing::info!(
        lesson_id = %lesson_id,
        score = grade.score,
        total = grade.total,
        "quiz graded"
    );

    let result = QuizResult {
        grade,
        outcomes: &outcomes,
    };
    Ok(Html(render::quiz_page(&lesson_id, &questions, Some(&result))))
}

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::render;
use crate::store::ContentError;

#[derive(Debug, Clone)]
pub struct AppError {
    status: StatusCode,
    title: String,
    message: String,
    is_operational: bool,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::operational(StatusCode::NOT_FOUND, "Not found", message)
    }

    pub fn lesson_not_found() -> Self {
        Self::operational(StatusCode::NOT_FOUND, "Lesson not found", "")
    }

    pub fn quiz_not_found() -> Self {
        Self::operational(StatusCode::NOT_FOUND, "Quiz not found", "")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Something went wrong".to_string(),
            message: message.into(),
            is_operational: false,
        }
    }

    /// Logs the cause and keeps the public response uniform: unreadable or
    /// malformed content is a 404, a database failure is a 500.
    pub fn from_content(err: ContentError, not_found: fn() -> Self) -> Self {
        if err.presents_as_not_found() {
            tracing::warn!(error = %err, "content unavailable, answering not found");
            not_found()
        } else {
            tracing::error!(error = %err, "content lookup failed");
            Self::internal(err.to_string())
        }
    }

    fn operational(
        status: StatusCode,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            title: title.into(),
            message: message.into(),
            is_operational: true,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_operational {
            self.message
        } else {
            "The server could not complete this request.".to_string()
        };

        (self.status, Html(render::error_page(&self.title, &message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn malformed_content_maps_to_not_found() {
        let err = ContentError::Malformed {
            origin: "data/quizzes/x_quiz.json".to_string(),
            reason: "expected value".to_string(),
        };
        let response = AppError::from_content(err, AppError::quiz_not_found).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn io_failure_maps_to_not_found() {
        let err = ContentError::Io {
            path: PathBuf::from("data/lessons/x.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let response = AppError::from_content(err, AppError::lesson_not_found).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_failure_is_internal_and_hides_details() {
        let err = ContentError::Database(sqlx::Error::PoolTimedOut);
        let app_err = AppError::from_content(err, AppError::lesson_not_found);
        assert!(!app_err.is_operational);
        assert!(app_err.message.contains("pool timed out"));

        let response = app_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Content resolution: lesson and quiz lookup by identifier.
//!
//! A deployment reads from exactly one backend, the relational database or a
//! directory of JSON files. Both report "not found" as `Ok(None)` and keep
//! the cause of any other failure in [`ContentError`].

pub mod database;
pub mod files;
pub mod models;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ContentSource;

pub use database::DatabaseStore;
pub use files::FileStore;
pub use models::{Lesson, LessonBody, LessonSummary, Question, QuestionError, Section};

const MAX_ID_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content in {origin}: {reason}")]
    Malformed { origin: String, reason: String },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ContentError {
    /// Whether callers should present this failure as a plain "not found".
    pub fn presents_as_not_found(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Malformed { .. })
    }
}

/// Identifiers double as file names, so only a conservative charset is allowed.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[derive(Clone)]
pub enum ContentStore {
    Database(DatabaseStore),
    Files(FileStore),
}

impl ContentStore {
    pub fn source(&self) -> ContentSource {
        match self {
            Self::Database(_) => ContentSource::Database,
            Self::Files(_) => ContentSource::Files,
        }
    }

    pub async fn list_lessons(&self) -> Result<Vec<LessonSummary>, ContentError> {
        match self {
            Self::Database(store) => store.list_lessons().await,
            Self::Files(store) => store.list_lessons().await,
        }
    }

    pub async fn get_lesson(&self, id: &str) -> Result<Option<Lesson>, ContentError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        match self {
            Self::Database(store) => store.get_lesson(id).await,
            Self::Files(store) => store.get_lesson(id).await,
        }
    }

    pub async fn get_quiz_questions(
        &self,
        id: &str,
    ) -> Result<Option<Vec<Question>>, ContentError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        match self {
            Self::Database(store) => store.get_quiz_questions(id).await,
            Self::Files(store) => store.get_quiz_questions(id).await,
        }
    }

    pub async fn has_quiz(&self, id: &str) -> Result<bool, ContentError> {
        if !is_valid_id(id) {
            return Ok(false);
        }
        match self {
            Self::Database(store) => store.has_quiz(id).await,
            Self::Files(store) => store.has_quiz(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_id("1"));
        assert!(is_valid_id("intro-to_rust"));
    }

    #[test]
    fn rejects_traversal_and_oversized_identifiers() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("../secrets"));
        assert!(!is_valid_id("a/b"));
        assert!(!is_valid_id("lesson.json"));
        assert!(!is_valid_id(&"x".repeat(MAX_ID_LEN + 1)));
    }

    #[test]
    fn only_database_failures_surface_as_errors() {
        let malformed = ContentError::Malformed {
            origin: "quiz 1".to_string(),
            reason: "bad".to_string(),
        };
        assert!(malformed.presents_as_not_found());

        let io = ContentError::Io {
            path: PathBuf::from("data/lessons/1.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(io.presents_as_not_found());

        let db = ContentError::Database(sqlx::Error::PoolTimedOut);
        assert!(!db.presents_as_not_found());
    }
}

use std::sync::Arc;

use crate::cache::{CacheStats, CachedLesson, CachedQuiz, ContentCache};
use crate::store::{is_valid_id, ContentError, ContentStore, LessonSummary};

/// Cached access to the configured content store.
pub struct ContentService {
    store: ContentStore,
    cache: ContentCache,
}

impl ContentService {
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            cache: ContentCache::new(),
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub async fn manifest(&self) -> Result<Arc<[LessonSummary]>, ContentError> {
        self.cache
            .manifest(|| async {
                let lessons = self.store.list_lessons().await?;
                tracing::debug!(count = lessons.len(), "loaded lesson manifest");
                Ok::<_, ContentError>(Arc::from(lessons))
            })
            .await
    }

    /// Invalid identifiers are answered as missing without a cache entry.
    pub async fn lesson(&self, lesson_id: &str) -> Result<CachedLesson, ContentError> {
        if !is_valid_id(lesson_id) {
            return Ok(None);
        }
        self.cache
            .lessons()
            .get_or_load(lesson_id, || async {
                let lesson = self.store.get_lesson(lesson_id).await?;
                tracing::debug!(lesson_id, found = lesson.is_some(), "loaded lesson");
                Ok::<_, ContentError>(lesson.map(Arc::new))
            })
            .await
    }

    pub async fn quiz(&self, lesson_id: &str) -> Result<CachedQuiz, ContentError> {
        if !is_valid_id(lesson_id) {
            return Ok(None);
        }
        self.cache
            .quizzes()
            .get_or_load(lesson_id, || async {
                let questions = self.store.get_quiz_questions(lesson_id).await?;
                tracing::debug!(
                    lesson_id,
                    questions = questions.as_ref().map_or(0, Vec::len),
                    "loaded quiz"
                );
                Ok::<_, ContentError>(questions.map(Arc::from))
            })
            .await
    }

    /// Not cached: a lesson page reflects whether its quiz exists right now.
    pub async fn has_quiz(&self, lesson_id: &str) -> Result<bool, ContentError> {
        self.store.has_quiz(lesson_id).await
    }
}

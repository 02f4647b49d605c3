//! Process-lifetime memoization of content lookups.
//!
//! Entries are never evicted or invalidated: a lesson or quiz edited on disk
//! or in the database is picked up only after a restart. Not-found results
//! are remembered too; failed loads are not.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::store::{Lesson, LessonSummary, Question};

/// Memoizes one value per key; the loader for a key runs at most once.
pub struct Memo<V> {
    cells: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
}

impl<V: Clone> Memo<V> {
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored value for `key`, running `loader` on first use.
    ///
    /// Concurrent callers for the same key wait on the first loader instead
    /// of starting their own. An `Err` from the loader is returned to the
    /// caller and nothing is stored, so a later call loads again.
    pub async fn get_or_load<F, Fut, E>(&self, key: &str, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut cells = self.cells.lock();
            Arc::clone(cells.entry(key.to_string()).or_default())
        };
        let value = cell.get_or_try_init(loader).await?;
        Ok(value.clone())
    }

    /// Number of keys with a stored value.
    pub fn len(&self) -> usize {
        let cells = self.cells.lock();
        cells.values().filter(|cell| cell.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

pub type CachedLesson = Option<Arc<Lesson>>;
pub type CachedQuiz = Option<Arc<[Question]>>;

/// The caches owned by the request handlers, one per lookup kind.
#[derive(Default)]
pub struct ContentCache {
    manifest: OnceCell<Arc<[LessonSummary]>>,
    lessons: Memo<CachedLesson>,
    quizzes: Memo<CachedQuiz>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn manifest<F, Fut, E>(&self, loader: F) -> Result<Arc<[LessonSummary]>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<[LessonSummary]>, E>>,
    {
        self.manifest.get_or_try_init(loader).await.cloned()
    }

    pub fn lessons(&self) -> &Memo<CachedLesson> {
        &self.lessons
    }

    pub fn quizzes(&self) -> &Memo<CachedQuiz> {
        &self.quizzes
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            manifest_loaded: self.manifest.initialized(),
            lessons: self.lessons.len(),
            quizzes: self.quizzes.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub manifest_loaded: bool,
    pub lessons: usize,
    pub quizzes: usize,
}

impl CacheStats {
    pub fn total_entries(&self) -> usize {
        self.lessons + self.quizzes + usize::from(self.manifest_loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn loader_runs_once_per_key() {
        let memo: Memo<u32> = Memo::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = memo
                .get_or_load("a", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.len(), 1);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let memo: Memo<String> = Memo::new();
        let a = memo
            .get_or_load("a", || async { Ok::<_, ()>("first".to_string()) })
            .await
            .unwrap();
        let b = memo
            .get_or_load("b", || async { Ok::<_, ()>("second".to_string()) })
            .await
            .unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("first", "second"));
    }

    #[tokio::test]
    async fn not_found_is_remembered() {
        let memo: Memo<Option<u32>> = Memo::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = memo
                .get_or_load("missing", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(None)
                })
                .await
                .unwrap();
            assert_eq!(value, None);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let memo: Memo<u32> = Memo::new();

        let first = memo
            .get_or_load("k", || async { Err::<u32, _>("boom") })
            .await;
        assert_eq!(first, Err("boom"));
        assert!(memo.is_empty());

        let second = memo.get_or_load("k", || async { Ok::<_, &str>(3) }).await;
        assert_eq!(second, Ok(3));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_access_loads_once() {
        let memo: Arc<Memo<u32>> = Arc::new(Memo::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let memo = Arc::clone(&memo);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    memo.get_or_load("shared", || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok::<_, ()>(42)
                    })
                    .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), Ok(42));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cached_quiz_is_the_same_allocation() {
        let cache = ContentCache::new();
        let questions: Arc<[Question]> = Arc::from(vec![Question::new(
            "?",
            vec!["a".to_string()],
            0,
        )
        .unwrap()]);

        let first = cache
            .quizzes()
            .get_or_load("q", || {
                let questions = Arc::clone(&questions);
                async move { Ok::<_, ()>(Some(questions)) }
            })
            .await
            .unwrap()
            .unwrap();
        let second = cache
            .quizzes()
            .get_or_load("q", || async { Ok::<_, ()>(None) })
            .await
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().total_entries(), 1);
    }
}

use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::services::content::ContentService;
use crate::store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    content: Arc<ContentService>,
}

impl AppState {
    pub fn new(store: ContentStore) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            content: Arc::new(ContentService::new(store)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn content(&self) -> &ContentService {
        &self.content
    }
}

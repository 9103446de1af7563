//! In-memory schedule store using moka

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::session::{ScheduleStore, SessionId};
use crate::domain::{DomainError, WeeklySchedule};

/// Configuration for the in-memory schedule store
#[derive(Debug, Clone)]
pub struct InMemoryScheduleStoreConfig {
    /// Maximum number of sessions kept
    pub max_capacity: u64,
    /// Sessions not touched for this long are evicted
    pub time_to_idle: Option<Duration>,
}

impl Default for InMemoryScheduleStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_idle: Some(Duration::from_secs(24 * 3600)),
        }
    }
}

impl InMemoryScheduleStoreConfig {
    /// Sets the maximum number of sessions
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the time-to-idle duration
    pub fn with_time_to_idle(mut self, tti: Duration) -> Self {
        self.time_to_idle = Some(tti);
        self
    }

    /// Keeps sessions until capacity eviction
    pub fn without_time_to_idle(mut self) -> Self {
        self.time_to_idle = None;
        self
    }
}

/// Thread-safe schedule store keyed by session
///
/// Each entry is an `Arc` that is replaced whole on save, so readers always
/// see a complete schedule.
#[derive(Debug, Clone)]
pub struct InMemoryScheduleStore {
    cache: MokaCache<SessionId, Arc<WeeklySchedule>>,
}

impl InMemoryScheduleStore {
    /// Creates a new store with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryScheduleStoreConfig::default())
    }

    /// Creates a new store with the given configuration
    pub fn with_config(config: InMemoryScheduleStoreConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);

        if let Some(tti) = config.time_to_idle {
            builder = builder.time_to_idle(tti);
        }

        Self {
            cache: builder.build(),
        }
    }
}

impl Default for InMemoryScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    async fn save(
        &self,
        session: &SessionId,
        schedule: WeeklySchedule,
    ) -> Result<Arc<WeeklySchedule>, DomainError> {
        let schedule = Arc::new(schedule);
        self.cache.insert(session.clone(), Arc::clone(&schedule)).await;
        Ok(schedule)
    }

    async fn latest(
        &self,
        session: &SessionId,
    ) -> Result<Option<Arc<WeeklySchedule>>, DomainError> {
        Ok(self.cache.get(session).await)
    }

    async fn remove(&self, session: &SessionId) -> Result<bool, DomainError> {
        Ok(self.cache.remove(session).await.is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count())
    }
}

//! Schedule store trait

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::SessionId;
use crate::domain::error::DomainError;
use crate::domain::planner::WeeklySchedule;

/// Keeps the most recent schedule generated for each session
///
/// Saves replace the stored value as a whole; reads hand out a shared
/// snapshot that later saves never modify.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Store a schedule as the session's latest, replacing any previous one
    async fn save(
        &self,
        session: &SessionId,
        schedule: WeeklySchedule,
    ) -> Result<Arc<WeeklySchedule>, DomainError>;

    /// Latest schedule for the session, if any
    async fn latest(&self, session: &SessionId)
        -> Result<Option<Arc<WeeklySchedule>>, DomainError>;

    /// Forget the session's schedule
    async fn remove(&self, session: &SessionId) -> Result<bool, DomainError>;

    /// Approximate number of stored schedules
    async fn count(&self) -> Result<u64, DomainError>;
}

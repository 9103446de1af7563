//! Application state shared by the handlers

use std::sync::Arc;

use crate::domain::planner::PlannerSettings;
use crate::domain::session::ScheduleStore;

/// Engine settings and the per-session schedule store
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<PlannerSettings>,
    pub store: Arc<dyn ScheduleStore>,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(settings: PlannerSettings, store: Arc<dyn ScheduleStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            store,
        }
    }
}

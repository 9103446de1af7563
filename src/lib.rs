//! Study planner
//!
//! Turns a student's courses, credit units and self-rated confidence into a
//! weekly study timetable, served over HTTP and exportable as CSV or PDF.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::session::InMemoryScheduleStore;
use tracing::info;

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with custom configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let settings = config
        .planner
        .to_settings()
        .map_err(|e| anyhow::anyhow!("Invalid planner configuration: {}", e))?;

    info!(
        credit_scaling = ?settings.credit,
        confidence_factors = ?settings.confidence.factors(),
        max_courses = settings.max_courses,
        "Planner settings loaded"
    );

    let store = InMemoryScheduleStore::with_config(config.sessions.store_config());

    info!(
        max_sessions = config.sessions.max_capacity,
        time_to_idle_secs = config.sessions.time_to_idle_secs,
        "Schedule store initialized"
    );

    Ok(AppState::new(settings, Arc::new(store)))
}

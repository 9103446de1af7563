//! Session domain - per-session storage of generated schedules

mod entity;
pub mod repository;

pub use entity::{validate_session_id, SessionId, DEFAULT_SESSION_ID, MAX_SESSION_ID_LENGTH};
pub use repository::ScheduleStore;

#[cfg(test)]
pub use repository::MockScheduleStore;

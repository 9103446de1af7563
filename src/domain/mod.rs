//! Domain layer - Core business logic and entities

pub mod error;
pub mod planner;
pub mod session;

pub use error::DomainError;
pub use planner::{
    generate, Allocation, Course, DailyPlan, PlannerSettings, ScheduleRequest, StudentProfile,
    Weekday, WeeklySchedule,
};
pub use session::{ScheduleStore, SessionId};

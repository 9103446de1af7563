//! Planner domain - study-hour allocation engine

mod engine;
mod entity;
pub mod rounding;
mod validation;
pub mod weighting;

pub use engine::generate;
pub use entity::{
    format_hours, units_to_hours, Allocation, Course, DailyPlan, ScheduleRequest,
    StudentProfile, Weekday, WeeklySchedule, DAYS_PER_WEEK, UNITS_PER_HOUR,
};
pub use validation::{
    describe, validate_request, PlanValidationError, MAX_CONFIDENCE, MAX_HOURS_PER_DAY,
    MIN_CONFIDENCE,
};
pub use weighting::{ConfidenceCurve, CreditScaling, PlannerSettings};

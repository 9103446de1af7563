//! Schedule request validation

use std::collections::HashSet;
use std::fmt;

use super::rounding::hours_to_units;
use super::{Course, StudentProfile};

/// Largest accepted daily study budget in hours
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Lowest confidence rating
pub const MIN_CONFIDENCE: i64 = 1;

/// Highest confidence rating
pub const MAX_CONFIDENCE: i64 = 5;

/// Schedule request validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum PlanValidationError {
    /// A profile label is empty
    EmptyField { field: &'static str },
    /// Daily budget is not finite or outside (0, 24]
    InvalidHoursPerDay { value: f64, max: f64 },
    /// Daily budget is below one 0.1 h unit
    BudgetBelowResolution { value: f64 },
    /// No courses given
    NoCourses,
    /// More courses than the configured limit
    TooManyCourses { count: usize, max: usize },
    /// Course name is empty
    EmptyCourseName { index: usize },
    /// Course name appears more than once
    DuplicateCourse { name: String },
    /// Credit unit below 1
    InvalidCreditUnit { course: String, value: i64 },
    /// Confidence outside [1, 5]
    InvalidConfidence {
        course: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl fmt::Display for PlanValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidHoursPerDay { value, max } => {
                write!(
                    f,
                    "Invalid avg_hours_per_day {}: must be greater than 0 and at most {}",
                    value, max
                )
            }
            Self::BudgetBelowResolution { value } => {
                write!(
                    f,
                    "avg_hours_per_day {} is below the 0.1 h scheduling resolution",
                    value
                )
            }
            Self::NoCourses => write!(f, "At least one course is required"),
            Self::TooManyCourses { count, max } => {
                write!(f, "Too many courses: {} (max {})", count, max)
            }
            Self::EmptyCourseName { index } => {
                write!(f, "Course #{} has an empty name", index + 1)
            }
            Self::DuplicateCourse { name } => write!(f, "Duplicate course '{}'", name),
            Self::InvalidCreditUnit { course, value } => {
                write!(
                    f,
                    "Invalid credit_unit {} for course '{}': must be at least 1",
                    value, course
                )
            }
            Self::InvalidConfidence {
                course,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Invalid confidence_level {} for course '{}': must be between {} and {}",
                    value, course, min, max
                )
            }
        }
    }
}

impl std::error::Error for PlanValidationError {}

/// Validate a generation request, collecting every problem found
pub fn validate_request(
    profile: &StudentProfile,
    courses: &[Course],
    max_courses: usize,
) -> Result<(), Vec<PlanValidationError>> {
    let mut errors = validate_profile(profile);
    errors.extend(validate_courses(courses, max_courses));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_profile(profile: &StudentProfile) -> Vec<PlanValidationError> {
    let mut errors = Vec::new();

    let labels = [
        ("student_name", &profile.student_name),
        ("academic_level", &profile.academic_level),
        ("semester", &profile.semester),
    ];

    for (field, value) in labels {
        if value.trim().is_empty() {
            errors.push(PlanValidationError::EmptyField { field });
        }
    }

    let hours = profile.avg_hours_per_day;
    if !hours.is_finite() || hours <= 0.0 || hours > MAX_HOURS_PER_DAY {
        errors.push(PlanValidationError::InvalidHoursPerDay {
            value: hours,
            max: MAX_HOURS_PER_DAY,
        });
    } else if hours_to_units(hours) == 0 {
        errors.push(PlanValidationError::BudgetBelowResolution { value: hours });
    }

    errors
}

fn validate_courses(courses: &[Course], max_courses: usize) -> Vec<PlanValidationError> {
    if courses.is_empty() {
        return vec![PlanValidationError::NoCourses];
    }

    let mut errors = Vec::new();

    if courses.len() > max_courses {
        errors.push(PlanValidationError::TooManyCourses {
            count: courses.len(),
            max: max_courses,
        });
    }

    let mut seen = HashSet::new();

    for (index, course) in courses.iter().enumerate() {
        let name = course.name.trim();

        if name.is_empty() {
            errors.push(PlanValidationError::EmptyCourseName { index });
        } else if !seen.insert(name) {
            errors.push(PlanValidationError::DuplicateCourse {
                name: name.to_string(),
            });
        }

        if course.credit_unit < 1 {
            errors.push(PlanValidationError::InvalidCreditUnit {
                course: name.to_string(),
                value: course.credit_unit,
            });
        }

        if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&course.confidence_level) {
            errors.push(PlanValidationError::InvalidConfidence {
                course: name.to_string(),
                value: course.confidence_level,
                min: MIN_CONFIDENCE,
                max: MAX_CONFIDENCE,
            });
        }
    }

    errors
}

/// Join validation errors into a single message
pub fn describe(errors: &[PlanValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

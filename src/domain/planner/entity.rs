//! Planner domain entities

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of rounding units in one hour (allocations have 0.1 h resolution)
pub const UNITS_PER_HOUR: u64 = 10;

/// Days in the planned week
pub const DAYS_PER_WEEK: u64 = 7;

/// Day of the planned week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in schedule order
    pub const ALL: [Weekday; DAYS_PER_WEEK as usize] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The student a schedule is generated for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_name: String,
    /// Opaque label, e.g. "200L"
    pub academic_level: String,
    /// Opaque label, e.g. "First Semester"
    pub semester: String,
    /// Study budget shared by all courses each day
    pub avg_hours_per_day: f64,
}

/// A course the student is preparing for
///
/// Credit and confidence are kept signed so out-of-range input reaches
/// validation instead of failing at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub credit_unit: i64,
    /// 1 = least confident, 5 = most confident
    pub confidence_level: i64,
}

impl Course {
    pub fn new(name: impl Into<String>, credit_unit: i64, confidence_level: i64) -> Self {
        Self {
            name: name.into(),
            credit_unit,
            confidence_level,
        }
    }
}

/// Schedule generation input as received on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(flatten)]
    pub profile: StudentProfile,
    pub courses: Vec<Course>,
}

/// A course's study hours for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub course: String,
    pub hours: f64,
}

/// One day's study plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub day: Weekday,
    pub allocations: Vec<Allocation>,
}

impl DailyPlan {
    /// Total hours allocated on this day
    pub fn total_hours(&self) -> f64 {
        self.allocations.iter().map(|a| a.hours).sum()
    }
}

/// Full weekly plan with per-course totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub student_name: String,
    pub academic_level: String,
    pub semester: String,
    pub total_weekly_hours: f64,
    pub schedule: Vec<DailyPlan>,
    pub per_course_hours: BTreeMap<String, f64>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl WeeklySchedule {
    /// Iterates `(day, allocation)` pairs in schedule order
    pub fn rows(&self) -> impl Iterator<Item = (Weekday, &Allocation)> {
        self.schedule
            .iter()
            .flat_map(|daily| daily.allocations.iter().map(move |a| (daily.day, a)))
    }
}

/// Converts a count of rounding units to hours
pub fn units_to_hours(units: u64) -> f64 {
    units as f64 / UNITS_PER_HOUR as f64
}

/// Formats hours with the schedule's one-decimal resolution
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}", hours)
}

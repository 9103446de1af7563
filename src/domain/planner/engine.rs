//! Weekly study-hour allocation

use std::collections::BTreeMap;

use super::rounding::{apportion, hours_to_units};
use super::validation::{describe, validate_request};
use super::weighting::{normalize, rank_courses, PlannerSettings};
use super::{
    format_hours, units_to_hours, Allocation, Course, DailyPlan, StudentProfile, Weekday,
    WeeklySchedule, DAYS_PER_WEEK,
};
use crate::domain::DomainError;

const WEIGHTING_NOTE: &str =
    "Lower confidence and higher credit-unit courses are allocated more study time.";
const SPREAD_NOTE: &str = "Hours are distributed evenly across the week.";

/// Build a weekly schedule for the given student and courses
///
/// Pure and deterministic. Fails with [`DomainError::Validation`] before any
/// computation when the input is invalid, and with [`DomainError::Internal`]
/// if proportional rounding breaks its own invariant.
pub fn generate(
    profile: &StudentProfile,
    courses: &[Course],
    settings: &PlannerSettings,
) -> Result<WeeklySchedule, DomainError> {
    validate_request(profile, courses, settings.max_courses)
        .map_err(|errors| DomainError::validation(describe(&errors)))?;

    let ranked = rank_courses(courses, settings);
    let raw_weights: Vec<f64> = ranked.iter().map(|c| c.raw_weight).collect();
    let shares = normalize(&raw_weights)?;

    let daily_units = hours_to_units(profile.avg_hours_per_day);
    let course_units = apportion(daily_units, &shares)?;

    let allocated: u64 = course_units.iter().sum();
    if allocated != daily_units {
        return Err(DomainError::internal(format!(
            "allocated {} units against a daily budget of {}",
            allocated, daily_units
        )));
    }

    let allocations: Vec<Allocation> = ranked
        .iter()
        .zip(&course_units)
        .filter(|(_, units)| **units > 0)
        .map(|(course, units)| Allocation {
            course: course.name.clone(),
            hours: units_to_hours(*units),
        })
        .collect();

    let schedule = Weekday::ALL
        .iter()
        .map(|day| DailyPlan {
            day: *day,
            allocations: allocations.clone(),
        })
        .collect();

    let per_course_hours: BTreeMap<String, f64> = ranked
        .iter()
        .zip(&course_units)
        .map(|(course, units)| (course.name.clone(), units_to_hours(units * DAYS_PER_WEEK)))
        .collect();

    let unfunded: Vec<&str> = ranked
        .iter()
        .zip(&course_units)
        .filter(|(_, units)| **units == 0)
        .map(|(course, _)| course.name.as_str())
        .collect();

    let notes = build_notes(profile.avg_hours_per_day, daily_units, &unfunded);

    Ok(WeeklySchedule {
        student_name: profile.student_name.clone(),
        academic_level: profile.academic_level.clone(),
        semester: profile.semester.clone(),
        total_weekly_hours: units_to_hours(daily_units * DAYS_PER_WEEK),
        schedule,
        per_course_hours,
        notes,
    })
}

fn build_notes(requested_hours: f64, daily_units: u64, unfunded: &[&str]) -> Vec<String> {
    let mut notes = vec![WEIGHTING_NOTE.to_string(), SPREAD_NOTE.to_string()];

    let budget = units_to_hours(daily_units);
    let unallocated = requested_hours - budget;
    if unallocated > 1e-9 {
        notes.push(format!(
            "Daily budget of {} h was rounded down to {} h (0.1 h resolution); \
             {:.2} h per day is left unallocated.",
            requested_hours,
            format_hours(budget),
            unallocated
        ));
    }

    if !unfunded.is_empty() {
        notes.push(format!(
            "No time could be allocated to {} at a {} h daily budget; \
             increase the budget or reduce the course list.",
            unfunded.join(", "),
            format_hours(budget)
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::planner::{ConfidenceCurve, CreditScaling};

    fn profile(hours: f64) -> StudentProfile {
        StudentProfile {
            student_name: "Ada Lovelace".to_string(),
            academic_level: "200L".to_string(),
            semester: "First Semester".to_string(),
            avg_hours_per_day: hours,
        }
    }

    fn hours_for(daily: &DailyPlan, course: &str) -> Option<f64> {
        daily
            .allocations
            .iter()
            .find(|a| a.course == course)
            .map(|a| a.hours)
    }

    #[test]
    fn test_reference_example() {
        let courses = vec![Course::new("Math", 3, 2), Course::new("Physics", 2, 4)];
        let schedule = generate(&profile(4.0), &courses, &PlannerSettings::default()).unwrap();

        assert_eq!(schedule.schedule.len(), 7);
        for daily in &schedule.schedule {
            assert_eq!(hours_for(daily, "Math"), Some(3.0));
            assert_eq!(hours_for(daily, "Physics"), Some(1.0));
        }

        assert_eq!(schedule.per_course_hours["Math"], 21.0);
        assert_eq!(schedule.per_course_hours["Physics"], 7.0);
        assert_eq!(schedule.total_weekly_hours, 28.0);
    }

    #[test]
    fn test_profile_labels_echoed() {
        let courses = vec![Course::new("Math", 3, 2)];
        let schedule = generate(&profile(2.0), &courses, &PlannerSettings::default()).unwrap();

        assert_eq!(schedule.student_name, "Ada Lovelace");
        assert_eq!(schedule.academic_level, "200L");
        assert_eq!(schedule.semester, "First Semester");
    }

    #[test]
    fn test_days_are_monday_first() {
        let courses = vec![Course::new("Math", 3, 2)];
        let schedule = generate(&profile(2.0), &courses, &PlannerSettings::default()).unwrap();

        let days: Vec<Weekday> = schedule.schedule.iter().map(|d| d.day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());
    }

    #[test]
    fn test_daily_totals_match_budget() {
        let courses = vec![
            Course::new("Math", 3, 1),
            Course::new("Physics", 2, 3),
            Course::new("Chemistry", 4, 5),
            Course::new("Biology", 1, 2),
            Course::new("English", 2, 4),
        ];

        for tenths in 1..=240u64 {
            let hours = tenths as f64 / 10.0;
            let schedule =
                generate(&profile(hours), &courses, &PlannerSettings::default()).unwrap();

            for daily in &schedule.schedule {
                let units: u64 = daily
                    .allocations
                    .iter()
                    .map(|a| (a.hours * 10.0).round() as u64)
                    .sum();
                assert_eq!(units, tenths, "budget {} on {}", hours, daily.day);
            }
        }
    }

    #[test]
    fn test_daily_totals_never_exceed_budget() {
        let courses = vec![
            Course::new("Math", 3, 2),
            Course::new("Physics", 2, 4),
            Course::new("History", 1, 1),
        ];

        for hundredths in (10..=2400u64).step_by(7) {
            let hours = hundredths as f64 / 100.0;
            let schedule =
                generate(&profile(hours), &courses, &PlannerSettings::default()).unwrap();

            for daily in &schedule.schedule {
                let total: f64 = daily.allocations.iter().map(|a| a.hours).sum();
                assert!(total <= hours + 1e-9, "day total {} exceeds budget {}", total, hours);
                assert!(hours - total < 0.1, "budget {} left {} unused", hours, hours - total);
            }
            assert!(schedule.total_weekly_hours <= 7.0 * hours + 1e-9);
        }
    }

    #[test]
    fn test_residual_adjusts_only_the_largest_allocation() {
        let courses = vec![
            Course::new("A", 21, 5),
            Course::new("B", 21, 5),
            Course::new("C", 38, 5),
        ];
        let schedule = generate(&profile(4.0), &courses, &PlannerSettings::default()).unwrap();

        let monday: Vec<(&str, f64)> = schedule.schedule[0]
            .allocations
            .iter()
            .map(|a| (a.course.as_str(), a.hours))
            .collect();
        assert_eq!(monday, vec![("C", 1.8), ("A", 1.1), ("B", 1.1)]);
    }

    #[test]
    fn test_weekly_total_is_sum_over_days() {
        let courses = vec![
            Course::new("Math", 3, 1),
            Course::new("Physics", 2, 3),
            Course::new("Chemistry", 4, 5),
        ];
        let schedule = generate(&profile(3.7), &courses, &PlannerSettings::default()).unwrap();

        for (course, weekly) in &schedule.per_course_hours {
            let summed: f64 = schedule
                .schedule
                .iter()
                .filter_map(|daily| hours_for(daily, course))
                .sum();
            assert!((summed - weekly).abs() < 1e-9, "{}: {} vs {}", course, summed, weekly);
        }
    }

    #[test]
    fn test_low_confidence_gets_at_least_as_much_time() {
        let courses = vec![Course::new("Confident", 3, 5), Course::new("Unsure", 3, 1)];
        let schedule = generate(&profile(5.0), &courses, &PlannerSettings::default()).unwrap();

        assert!(schedule.per_course_hours["Unsure"] >= schedule.per_course_hours["Confident"]);
        // confidence 1 ranks first
        assert_eq!(schedule.schedule[0].allocations[0].course, "Unsure");
    }

    #[test]
    fn test_allocations_ordered_by_weight_then_input() {
        let courses = vec![
            Course::new("A", 1, 3),
            Course::new("B", 3, 1),
            Course::new("C", 1, 3),
        ];
        let schedule = generate(&profile(6.0), &courses, &PlannerSettings::default()).unwrap();

        let names: Vec<&str> = schedule.schedule[0]
            .allocations
            .iter()
            .map(|a| a.course.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let courses = vec![
            Course::new("Math", 3, 2),
            Course::new("Physics", 2, 4),
            Course::new("History", 1, 1),
        ];
        let settings = PlannerSettings::default();

        let first = generate(&profile(2.3), &courses, &settings).unwrap();
        let second = generate(&profile(2.3), &courses, &settings).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_small_budget_drops_zero_allocations_and_notes_them() {
        let courses = vec![
            Course::new("Math", 4, 1),
            Course::new("Physics", 1, 5),
            Course::new("Art", 1, 5),
        ];
        let schedule = generate(&profile(0.1), &courses, &PlannerSettings::default()).unwrap();

        for daily in &schedule.schedule {
            assert_eq!(daily.allocations.len(), 1);
            assert_eq!(daily.allocations[0].course, "Math");
        }

        assert_eq!(schedule.per_course_hours["Physics"], 0.0);
        assert_eq!(schedule.per_course_hours["Art"], 0.0);
        assert!(schedule
            .notes
            .iter()
            .any(|n| n.contains("Physics, Art")));
    }

    #[test]
    fn test_budget_rounding_is_noted() {
        let courses = vec![Course::new("Math", 3, 2)];
        let schedule = generate(&profile(2.25), &courses, &PlannerSettings::default()).unwrap();

        assert_eq!(schedule.total_weekly_hours, 15.4);
        assert!(schedule
            .notes
            .iter()
            .any(|n| n.contains("rounded down to 2.2 h") && n.contains("0.05 h per day")));

        let exact = generate(&profile(2.0), &courses, &PlannerSettings::default()).unwrap();
        assert!(!exact.notes.iter().any(|n| n.contains("rounded")));
    }

    #[test]
    fn test_validation_failure_reports_all_problems() {
        let courses = vec![Course::new("Math", 0, 7)];
        let err = generate(&profile(-1.0), &courses, &PlannerSettings::default()).unwrap_err();

        let message = err.to_string();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(message.contains("avg_hours_per_day"));
        assert!(message.contains("credit_unit"));
        assert!(message.contains("confidence_level"));
    }

    #[test]
    fn test_empty_courses_rejected() {
        let err = generate(&profile(4.0), &[], &PlannerSettings::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn test_custom_settings_change_weighting() {
        let courses = vec![Course::new("Math", 3, 2), Course::new("Physics", 1, 2)];
        let settings = PlannerSettings {
            confidence: ConfidenceCurve::new(&[1.0, 1.0, 1.0, 1.0, 1.0]).unwrap(),
            credit: CreditScaling::tapered(0.5).unwrap(),
            max_courses: 10,
        };

        // Math = 1 + 0.5 * 2 = 2, Physics = 1 -> 2/3 and 1/3 of 3 h
        let schedule = generate(&profile(3.0), &courses, &settings).unwrap();
        assert_eq!(hours_for(&schedule.schedule[0], "Math"), Some(2.0));
        assert_eq!(hours_for(&schedule.schedule[0], "Physics"), Some(1.0));
    }

    #[test]
    fn test_course_names_are_trimmed() {
        let courses = vec![Course::new("  Math ", 3, 2)];
        let schedule = generate(&profile(2.0), &courses, &PlannerSettings::default()).unwrap();

        assert!(schedule.per_course_hours.contains_key("Math"));
        assert_eq!(schedule.schedule[0].allocations[0].course, "Math");
    }
}

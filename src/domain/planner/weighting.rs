//! Course weighting: confidence curve, credit scaling and normalisation

use super::validation::{MAX_CONFIDENCE, MIN_CONFIDENCE};
use super::Course;
use crate::domain::DomainError;

const CURVE_LEN: usize = (MAX_CONFIDENCE - MIN_CONFIDENCE + 1) as usize;

/// Study-time multiplier per confidence level
///
/// Entry `i` applies to confidence `i + 1`. Factors are strictly positive
/// and never increase with confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceCurve([f64; CURVE_LEN]);

impl ConfidenceCurve {
    pub fn new(factors: &[f64]) -> Result<Self, DomainError> {
        let factors: [f64; CURVE_LEN] = factors.try_into().map_err(|_| {
            DomainError::configuration(format!(
                "confidence curve needs exactly {} factors, got {}",
                CURVE_LEN,
                factors.len()
            ))
        })?;

        if let Some(bad) = factors.iter().find(|f| !f.is_finite() || **f <= 0.0) {
            return Err(DomainError::configuration(format!(
                "confidence factor {} must be finite and positive",
                bad
            )));
        }

        if factors.windows(2).any(|w| w[1] > w[0]) {
            return Err(DomainError::configuration(
                "confidence factors must not increase with confidence level",
            ));
        }

        Ok(Self(factors))
    }

    /// Multiplier for a validated confidence level
    pub fn factor(&self, confidence_level: i64) -> f64 {
        let level = confidence_level.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
        self.0[(level - MIN_CONFIDENCE) as usize]
    }

    pub fn factors(&self) -> &[f64] {
        &self.0
    }
}

impl Default for ConfidenceCurve {
    /// `6 - confidence_level`
    fn default() -> Self {
        Self([5.0, 4.0, 3.0, 2.0, 1.0])
    }
}

/// How credit units translate into workload weight
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CreditScaling {
    /// Weight grows proportionally with credit units
    #[default]
    Linear,
    /// Each credit beyond the first adds `rate` to a base weight of 1
    Tapered { rate: f64 },
}

impl CreditScaling {
    pub fn tapered(rate: f64) -> Result<Self, DomainError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(DomainError::configuration(format!(
                "credit taper rate {} must be finite and non-negative",
                rate
            )));
        }
        Ok(Self::Tapered { rate })
    }

    /// Multiplier for a validated credit unit
    pub fn factor(&self, credit_unit: i64) -> f64 {
        let credit = credit_unit.max(1) as f64;
        match self {
            Self::Linear => credit,
            Self::Tapered { rate } => 1.0 + rate * (credit - 1.0),
        }
    }
}

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSettings {
    pub confidence: ConfidenceCurve,
    pub credit: CreditScaling,
    pub max_courses: usize,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            confidence: ConfidenceCurve::default(),
            credit: CreditScaling::default(),
            max_courses: 50,
        }
    }
}

impl PlannerSettings {
    /// Build settings, rejecting combinations whose weights could overflow
    ///
    /// The heaviest possible request is `max_courses` courses at the largest
    /// credit unit and the lowest confidence; its weight total must stay finite.
    pub fn new(
        confidence: ConfidenceCurve,
        credit: CreditScaling,
        max_courses: usize,
    ) -> Result<Self, DomainError> {
        if max_courses == 0 {
            return Err(DomainError::configuration(
                "planner.max_courses must be at least 1",
            ));
        }

        let heaviest = credit.factor(i64::MAX) * confidence.factor(MIN_CONFIDENCE);
        if !(heaviest * max_courses as f64).is_finite() {
            return Err(DomainError::configuration(format!(
                "credit scaling {:?} with confidence factor {} overflows the course weight",
                credit,
                confidence.factor(MIN_CONFIDENCE)
            )));
        }

        Ok(Self {
            confidence,
            credit,
            max_courses,
        })
    }

    /// Raw (un-normalised) weight of a validated course
    pub fn raw_weight(&self, course: &Course) -> f64 {
        self.credit.factor(course.credit_unit) * self.confidence.factor(course.confidence_level)
    }
}

/// Course with its raw weight and position in the request
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCourse {
    pub name: String,
    pub raw_weight: f64,
    pub input_index: usize,
}

/// Weigh courses and order them by descending weight, ties in input order
pub fn rank_courses(courses: &[Course], settings: &PlannerSettings) -> Vec<WeightedCourse> {
    let mut ranked: Vec<WeightedCourse> = courses
        .iter()
        .enumerate()
        .map(|(input_index, course)| WeightedCourse {
            name: course.name.trim().to_string(),
            raw_weight: settings.raw_weight(course),
            input_index,
        })
        .collect();

    // stable: equal weights keep input order
    ranked.sort_by(|a, b| b.raw_weight.total_cmp(&a.raw_weight));
    ranked
}

/// Scale weights into shares summing to 1
pub fn normalize(weights: &[f64]) -> Result<Vec<f64>, DomainError> {
    let total: f64 = weights.iter().sum();

    if weights.is_empty() || !total.is_finite() || total <= 0.0 {
        return Err(DomainError::internal(format!(
            "cannot normalise weights with total {}",
            total
        )));
    }

    Ok(weights.iter().map(|w| w / total).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve_is_six_minus_confidence() {
        let curve = ConfidenceCurve::default();
        for level in 1..=5 {
            assert_eq!(curve.factor(level), (6 - level) as f64);
        }
    }

    #[test]
    fn test_curve_rejects_wrong_length() {
        let err = ConfidenceCurve::new(&[3.0, 2.0, 1.0]).unwrap_err();
        assert!(err.to_string().contains("exactly 5 factors"));
    }

    #[test]
    fn test_curve_rejects_increasing_factors() {
        assert!(ConfidenceCurve::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_err());
    }

    #[test]
    fn test_curve_rejects_non_positive_factors() {
        assert!(ConfidenceCurve::new(&[4.0, 3.0, 2.0, 1.0, 0.0]).is_err());
        assert!(ConfidenceCurve::new(&[4.0, 3.0, 2.0, 1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_curve_accepts_flat_segments() {
        let curve = ConfidenceCurve::new(&[2.0, 2.0, 1.5, 1.0, 1.0]).unwrap();
        assert_eq!(curve.factor(2), 2.0);
    }

    #[test]
    fn test_credit_scaling() {
        assert_eq!(CreditScaling::Linear.factor(3), 3.0);

        let tapered = CreditScaling::tapered(0.3).unwrap();
        assert!((tapered.factor(3) - 1.6).abs() < 1e-12);
        assert_eq!(tapered.factor(1), 1.0);

        assert!(CreditScaling::tapered(-0.1).is_err());
    }

    #[test]
    fn test_settings_reject_overflowing_weights() {
        let err = PlannerSettings::new(
            ConfidenceCurve::default(),
            CreditScaling::tapered(f64::MAX).unwrap(),
            50,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));

        let huge_curve = ConfidenceCurve::new(&[1e300, 1.0, 1.0, 1.0, 1.0]).unwrap();
        assert!(PlannerSettings::new(huge_curve, CreditScaling::Linear, 50).is_err());

        assert!(PlannerSettings::new(ConfidenceCurve::default(), CreditScaling::Linear, 0).is_err());
    }

    #[test]
    fn test_settings_accept_large_finite_weights() {
        let settings = PlannerSettings::new(
            ConfidenceCurve::default(),
            CreditScaling::tapered(1e6).unwrap(),
            50,
        )
        .unwrap();

        let courses = vec![Course::new("Heavy", i64::MAX, 1), Course::new("Light", 1, 5)];
        let ranked = rank_courses(&courses, &settings);
        let weights: Vec<f64> = ranked.iter().map(|c| c.raw_weight).collect();
        assert!(normalize(&weights).is_ok());
    }

    #[test]
    fn test_rank_courses_descending_and_stable() {
        let settings = PlannerSettings::default();
        let courses = vec![
            Course::new("A", 1, 5),
            Course::new("B", 2, 4),
            Course::new("C", 3, 2),
            Course::new("D", 4, 4),
        ];

        let ranked = rank_courses(&courses, &settings);
        let names: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();

        // C=12, B=4, D=8, A=1
        assert_eq!(names, vec!["C", "D", "B", "A"]);

        let tied = vec![Course::new("X", 2, 3), Course::new("Y", 3, 4)];
        let ranked = rank_courses(&tied, &settings);
        assert_eq!(ranked[0].name, "X");
        assert_eq!(ranked[1].name, "Y");
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let shares = normalize(&[12.0, 4.0, 7.5, 0.25]).unwrap();
        let total: f64 = shares.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(normalize(&[12.0, 4.0]).unwrap(), vec![0.75, 0.25]);
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(normalize(&[]).is_err());
    }
}

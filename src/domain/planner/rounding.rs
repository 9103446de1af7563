//! Proportional rounding into whole allocation units
//!
//! A daily budget is first converted into whole units (0.1 h each, rounded
//! down so a day never exceeds the requested budget), then split across
//! courses: each share is rounded half up and the residual is applied to the
//! largest allocation so the parts add back up to the whole.

use super::UNITS_PER_HOUR;
use crate::domain::DomainError;

/// Absorbs binary representation error in values like 2.3 * 10
const ROUNDING_EPSILON: f64 = 1e-9;

/// Convert hours to whole rounding units, rounding down
pub fn hours_to_units(hours: f64) -> u64 {
    if !hours.is_finite() || hours <= 0.0 {
        return 0;
    }
    (hours * UNITS_PER_HOUR as f64 + ROUNDING_EPSILON).floor() as u64
}

fn round_half_up(value: f64) -> u64 {
    (value + 0.5 + ROUNDING_EPSILON).floor() as u64
}

/// Split `total` units across `shares`
///
/// Every part is its exact quota rounded half up. The difference between
/// `total` and the rounded sum is then added to (or taken from) the largest
/// part, ties to the earlier position. A residual larger than one unit per
/// part is an invariant violation and reported as [`DomainError::Internal`].
pub fn apportion(total: u64, shares: &[f64]) -> Result<Vec<u64>, DomainError> {
    let share_sum: f64 = shares.iter().sum();

    if shares.is_empty() || !share_sum.is_finite() || share_sum <= 0.0 {
        return Err(DomainError::internal(format!(
            "cannot apportion {} units over shares summing to {}",
            total, share_sum
        )));
    }

    if shares.iter().any(|s| !s.is_finite() || *s < 0.0) {
        return Err(DomainError::internal("apportion shares must be non-negative"));
    }

    let mut parts: Vec<u64> = shares
        .iter()
        .map(|s| round_half_up(total as f64 * s / share_sum))
        .collect();

    let rounded: u64 = parts.iter().sum();
    let residual = total as i64 - rounded as i64;

    if residual.unsigned_abs() as usize > parts.len() {
        return Err(DomainError::internal(format!(
            "rounding residual of {} units exceeds one unit for each of {} parts",
            residual,
            parts.len()
        )));
    }

    let largest = parts
        .iter()
        .enumerate()
        .fold(0, |best, (i, part)| if *part > parts[best] { i } else { best });

    let current = parts[largest];
    parts[largest] = current.checked_add_signed(residual).ok_or_else(|| {
        DomainError::internal(format!(
            "residual of {} units cannot be absorbed by the largest part {}",
            residual, current
        ))
    })?;

    Ok(parts)
}

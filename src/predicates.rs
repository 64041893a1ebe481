//! Array predicates and masked reductions
//!
//! Boolean masks are plain `Array1<bool>` values built elementwise. Reductions
//! fold over the value/mask pair directly; `select` gathers a subset only where
//! a metric has to hand one to another metric.

use crate::config::DegeneratePolicy;
use crate::error::{FairnessError, Result};
use ndarray::{Array1, Zip};
use tracing::warn;

/// Tolerance used when testing binary-encoded values
pub const BINARY_EPS: f64 = 1e-10;

/// Whether a binary-encoded value is the positive (1) class
#[inline]
pub fn is_one(value: f64) -> bool {
    (value - 1.0).abs() < BINARY_EPS
}

/// Error unless `actual` has the `expected` length
pub fn check_length(name: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(FairnessError::length_mismatch(name, expected, actual));
    }
    Ok(())
}

/// Mask of scores at or above `threshold`
pub fn threshold_mask(scores: &Array1<f64>, threshold: f64) -> Array1<bool> {
    scores.mapv(|s| s >= threshold)
}

/// Binarize scores into 0/1 predictions
pub fn binarize(scores: &Array1<f64>, threshold: f64) -> Array1<f64> {
    scores.mapv(|s| if s >= threshold { 1.0 } else { 0.0 })
}

/// Mask of values equal to 1
pub fn positive_mask(values: &Array1<f64>) -> Array1<bool> {
    values.mapv(is_one)
}

/// Elementwise negation
pub fn not(mask: &Array1<bool>) -> Array1<bool> {
    mask.mapv(|m| !m)
}

/// Elementwise conjunction of two equal-length masks
pub fn and(a: &Array1<bool>, b: &Array1<bool>) -> Array1<bool> {
    Zip::from(a).and(b).map_collect(|&x, &y| x && y)
}

/// Number of selected positions
pub fn count(mask: &Array1<bool>) -> usize {
    mask.iter().filter(|&&m| m).count()
}

/// Mean of the selected values, `None` if nothing is selected
pub fn masked_mean(values: &Array1<f64>, mask: &Array1<bool>) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .zip(mask.iter())
        .filter(|(_, &m)| m)
        .fold((0.0, 0usize), |(sum, n), (&v, _)| (sum + v, n + 1));

    if n > 0 {
        Some(sum / n as f64)
    } else {
        None
    }
}

/// Gather the selected values into a new array
pub fn select<T: Clone>(values: &Array1<T>, mask: &Array1<bool>) -> Array1<T> {
    values
        .iter()
        .zip(mask.iter())
        .filter(|(_, &m)| m)
        .map(|(v, _)| v.clone())
        .collect()
}

/// Turn an undefined mean into NaN or an error according to `policy`
pub(crate) fn resolve_mean(
    mean: Option<f64>,
    policy: DegeneratePolicy,
    subgroup: &str,
) -> Result<f64> {
    match (mean, policy) {
        (Some(m), _) => Ok(m),
        (None, DegeneratePolicy::Propagate) => {
            warn!(subgroup, "Mean over empty subgroup, returning NaN");
            Ok(f64::NAN)
        }
        (None, DegeneratePolicy::Strict) => Err(FairnessError::EmptySubgroup(format!(
            "no examples with {}",
            subgroup
        ))),
    }
}

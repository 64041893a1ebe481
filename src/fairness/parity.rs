//! Hard-decision demographic parity between the two protected groups
//!
//! The conditional aggregators take a [`ParityPrimitive`] so that the
//! per-bin comparison can be swapped for a stand-in in tests.

use crate::config::DegeneratePolicy;
use crate::error::{FairnessError, Result};
use crate::predicates::{check_length, is_one, masked_mean, not, positive_mask};
use ndarray::Array1;
use tracing::warn;

/// Binary demographic-parity measure restricted to the examples passed in
pub trait ParityPrimitive: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Compare positive-prediction rates of `sensitive_features == 0` and `== 1`.
    ///
    /// `labels` takes part only in length checks; selection rates depend on
    /// predictions alone.
    fn compute(
        &self,
        labels: &Array1<f64>,
        pred: &Array1<f64>,
        sensitive_features: &Array1<f64>,
    ) -> Result<f64>;
}

/// Selection rates `(rate_a0, rate_a1)` of the two protected groups.
///
/// Fails if either group has no examples.
pub fn selection_rates(pred: &Array1<f64>, sensitive_features: &Array1<f64>) -> Result<(f64, f64)> {
    check_length("sensitive_features", pred.len(), sensitive_features.len())?;

    let positive = pred.mapv(|p| if is_one(p) { 1.0 } else { 0.0 });
    let a_mask = positive_mask(sensitive_features);

    let rate_a0 = masked_mean(&positive, &not(&a_mask)).ok_or_else(|| {
        FairnessError::EmptySubgroup("no examples with sensitive feature 0".to_string())
    })?;
    let rate_a1 = masked_mean(&positive, &a_mask).ok_or_else(|| {
        FairnessError::EmptySubgroup("no examples with sensitive feature 1".to_string())
    })?;

    Ok((rate_a0, rate_a1))
}

/// Difference between the largest and smallest group selection rate
#[derive(Debug, Clone, Copy, Default)]
pub struct DemographicParityDifference;

impl ParityPrimitive for DemographicParityDifference {
    fn name(&self) -> &'static str {
        "demographic_parity_difference"
    }

    fn compute(
        &self,
        labels: &Array1<f64>,
        pred: &Array1<f64>,
        sensitive_features: &Array1<f64>,
    ) -> Result<f64> {
        check_length("pred", labels.len(), pred.len())?;
        let (rate_a0, rate_a1) = selection_rates(pred, sensitive_features)?;
        Ok((rate_a0 - rate_a1).abs())
    }
}

/// Ratio of the smallest to the largest group selection rate.
///
/// The ratio is 0/0 when neither group has a positive prediction; `policy`
/// decides whether that yields NaN or an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemographicParityRatio {
    policy: DegeneratePolicy,
}

impl DemographicParityRatio {
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }
}

impl ParityPrimitive for DemographicParityRatio {
    fn name(&self) -> &'static str {
        "demographic_parity_ratio"
    }

    fn compute(
        &self,
        labels: &Array1<f64>,
        pred: &Array1<f64>,
        sensitive_features: &Array1<f64>,
    ) -> Result<f64> {
        check_length("pred", labels.len(), pred.len())?;
        let (rate_a0, rate_a1) = selection_rates(pred, sensitive_features)?;

        let max_rate = rate_a0.max(rate_a1);
        if max_rate == 0.0 {
            return match self.policy {
                DegeneratePolicy::Propagate => {
                    warn!("No positive predictions in either group, ratio is NaN");
                    Ok(f64::NAN)
                }
                DegeneratePolicy::Strict => Err(FairnessError::ComputationError(
                    "demographic parity ratio undefined: no positive predictions in either group"
                        .to_string(),
                )),
            };
        }
        Ok(rate_a0.min(rate_a1) / max_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_selection_rates() {
        let pred = array![1.0, 1.0, 0.0, 1.0, 0.0, 0.0];
        let attr = array![1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        let (r0, r1) = selection_rates(&pred, &attr).unwrap();
        assert!((r0 - 1.0 / 3.0).abs() < 1e-10);
        assert!((r1 - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_difference() {
        let labels = array![1.0, 0.0, 1.0, 0.0];
        let pred = array![1.0, 1.0, 1.0, 0.0];
        let attr = array![1.0, 1.0, 0.0, 0.0];
        let d = DemographicParityDifference.compute(&labels, &pred, &attr).unwrap();
        assert!((d - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_ratio() {
        let labels = array![1.0, 0.0, 1.0, 0.0];
        let pred = array![1.0, 1.0, 1.0, 0.0];
        let attr = array![1.0, 1.0, 0.0, 0.0];
        let r = DemographicParityRatio::default().compute(&labels, &pred, &attr).unwrap();
        assert!((r - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_ratio_no_positive_predictions() {
        let labels = array![1.0, 0.0];
        let pred = array![0.0, 0.0];
        let attr = array![1.0, 0.0];
        let r = DemographicParityRatio::default()
            .compute(&labels, &pred, &attr)
            .unwrap();
        assert!(r.is_nan());

        let strict = DemographicParityRatio::new(DegeneratePolicy::Strict);
        let result = strict.compute(&labels, &pred, &attr);
        assert!(matches!(result, Err(FairnessError::ComputationError(_))));
    }

    #[test]
    fn test_missing_group_fails() {
        let labels = array![1.0, 0.0, 1.0];
        let pred = array![1.0, 0.0, 1.0];
        let attr = array![1.0, 1.0, 1.0];
        assert!(matches!(
            DemographicParityDifference.compute(&labels, &pred, &attr),
            Err(FairnessError::EmptySubgroup(_))
        ));
        assert!(DemographicParityRatio::default().compute(&labels, &pred, &attr).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(DemographicParityDifference.name(), "demographic_parity_difference");
        assert_eq!(DemographicParityRatio::default().name(), "demographic_parity_ratio");
    }
}

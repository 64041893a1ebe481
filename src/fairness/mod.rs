//! Group-fairness metrics for binary classifiers
//!
//! Compares model outputs between the two values of a binary protected
//! attribute:
//! - [`probability`] - accuracy and probability-level demographic parity,
//!   equal opportunity and equalised odds
//! - [`parity`] - hard-decision demographic parity difference and ratio
//! - [`conditional`] - parity averaged over bins of a grouping variable
//! - [`calibration`] - per-bin agreement of positive rates between groups
//!
//! [`FairnessEvaluator`] bundles them into a single [`FairnessReport`].

pub mod calibration;
pub mod conditional;
pub mod parity;
pub mod probability;

pub use calibration::{
    calibration, calibration_bins, CalibrationBins, CalibrationProportions, GroupBinCounts,
};
pub use conditional::{
    conditional_demographic_parity, conditional_demographic_parity_difference,
    conditional_demographic_parity_ratio, conditional_demographic_parity_ratio_with_policy,
    per_group_parity,
};
pub use parity::{
    selection_rates, DemographicParityDifference, DemographicParityRatio, ParityPrimitive,
};
pub use probability::{
    accuracy, accuracy_with_policy, demographic_parity_prob, demographic_parity_prob_with_policy,
    equal_opportunity_prob, equal_opportunity_prob_with_policy, equalised_odds_prob,
    equalised_odds_prob_with_policy,
};

use crate::config::FairnessConfig;
use crate::error::Result;
use crate::predicates::{binarize, check_length, count, positive_mask};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// NaN metrics are written as `null` and read back as NaN
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Calibration part of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSummary {
    /// `1 - mean |p_a0 - p_a1|` over bins
    #[serde(with = "nan_as_null")]
    pub score: f64,
    /// Number of bins used
    pub n_bins: usize,
    /// Per-bin positive shares for both groups
    pub proportions: CalibrationProportions,
}

/// Conditional demographic parity over a grouping variable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalParity {
    /// Mean demographic parity difference across groups
    #[serde(with = "nan_as_null")]
    pub difference: f64,
    /// Mean demographic parity ratio across groups, NaN if some group has no
    /// positive predictions
    #[serde(with = "nan_as_null")]
    pub ratio: f64,
    /// Number of distinct group values
    pub num_groups: usize,
}

/// Complete fairness evaluation report
///
/// Undefined metrics (empty subgroups under the propagate policy) are NaN,
/// serialize to `null` and deserialize back to NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessReport {
    pub total_samples: usize,
    /// Examples with `attr == 0`
    pub group_a0_size: usize,
    /// Examples with `attr == 1`
    pub group_a1_size: usize,
    /// Decision threshold the report was computed with
    pub threshold: f64,
    #[serde(with = "nan_as_null")]
    pub accuracy: f64,
    #[serde(with = "nan_as_null")]
    pub demographic_parity: f64,
    #[serde(with = "nan_as_null")]
    pub equal_opportunity: f64,
    #[serde(with = "nan_as_null")]
    pub equalised_odds: f64,
    pub calibration: CalibrationSummary,
    /// Present only for [`FairnessEvaluator::evaluate_conditional`]
    pub conditional: Option<ConditionalParity>,
}

impl FairnessReport {
    /// Serialize the report to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report written by [`FairnessReport::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Scores of one candidate model
#[derive(Debug, Clone)]
pub struct CandidateScores {
    pub name: String,
    pub scores: Array1<f64>,
}

impl CandidateScores {
    pub fn new(name: impl Into<String>, scores: Array1<f64>) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }
}

/// Report for one named candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedReport {
    pub name: String,
    pub report: FairnessReport,
}

/// Main fairness evaluator
pub struct FairnessEvaluator {
    config: FairnessConfig,
}

impl FairnessEvaluator {
    /// Create a new fairness evaluator
    pub fn new(config: FairnessConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &FairnessConfig {
        &self.config
    }

    /// Evaluate all unconditional metrics.
    ///
    /// # Arguments
    /// * `labels` - Ground truth (0.0 or 1.0)
    /// * `scores` - Predicted probabilities
    /// * `attr` - Protected attribute (0.0 or 1.0)
    pub fn evaluate(
        &self,
        labels: &Array1<f64>,
        scores: &Array1<f64>,
        attr: &Array1<f64>,
    ) -> Result<FairnessReport> {
        self.config.validate()?;
        check_length("scores", labels.len(), scores.len())?;
        check_length("attr", labels.len(), attr.len())?;

        let policy = self.config.degenerate_policy;
        let n_bins = self.config.n_bins;
        let group_a1_size = count(&positive_mask(attr));

        debug!(
            total_samples = labels.len(),
            group_a1_size,
            n_bins,
            ?policy,
            "Evaluating fairness metrics"
        );

        let (calibration_score, proportions) = calibration(labels, scores, attr, n_bins)?;

        Ok(FairnessReport {
            total_samples: labels.len(),
            group_a0_size: labels.len() - group_a1_size,
            group_a1_size,
            threshold: self.config.threshold,
            accuracy: accuracy_with_policy(labels, scores, self.config.threshold, policy)?,
            demographic_parity: demographic_parity_prob_with_policy(scores, attr, policy)?,
            equal_opportunity: equal_opportunity_prob_with_policy(labels, scores, attr, policy)?,
            equalised_odds: equalised_odds_prob_with_policy(labels, scores, attr, policy)?,
            calibration: CalibrationSummary {
                score: calibration_score,
                n_bins,
                proportions,
            },
            conditional: None,
        })
    }

    /// Evaluate all metrics, including conditional demographic parity over `groups`.
    ///
    /// Predictions are `scores` binarized at the configured threshold. Fails if
    /// any group lacks one of the protected attribute values. A group with no
    /// positive predictions makes the ratio NaN, or an error under
    /// [`DegeneratePolicy::Strict`](crate::config::DegeneratePolicy::Strict).
    pub fn evaluate_conditional<G: Ord>(
        &self,
        labels: &Array1<f64>,
        scores: &Array1<f64>,
        attr: &Array1<f64>,
        groups: &[G],
    ) -> Result<FairnessReport> {
        let mut report = self.evaluate(labels, scores, attr)?;

        let pred = binarize(scores, self.config.threshold);
        let difference = conditional_demographic_parity_difference(labels, &pred, attr, groups)?;
        let ratio = conditional_demographic_parity_ratio_with_policy(
            labels,
            &pred,
            attr,
            groups,
            self.config.degenerate_policy,
        )?;

        report.conditional = Some(ConditionalParity {
            difference,
            ratio,
            num_groups: groups.iter().collect::<BTreeSet<_>>().len(),
        });
        Ok(report)
    }

    /// Evaluate several candidate score vectors against the same labels and attribute.
    ///
    /// Candidates are evaluated in parallel; reports keep the input order.
    pub fn evaluate_many(
        &self,
        labels: &Array1<f64>,
        attr: &Array1<f64>,
        candidates: &[CandidateScores],
    ) -> Result<Vec<NamedReport>> {
        self.config.validate()?;
        debug!(num_candidates = candidates.len(), "Evaluating candidate models");

        candidates
            .par_iter()
            .map(|candidate| -> Result<NamedReport> {
                let report = self.evaluate(labels, &candidate.scores, attr)?;
                Ok(NamedReport {
                    name: candidate.name.clone(),
                    report,
                })
            })
            .collect()
    }
}

impl Default for FairnessEvaluator {
    fn default() -> Self {
        Self::new(FairnessConfig::default())
    }
}

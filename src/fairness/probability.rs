//! Unconditional metrics on predicted probabilities
//!
//! The demographic-parity family here compares mean predicted probability
//! instead of hard positive rates, so no threshold is involved.

use crate::config::DegeneratePolicy;
use crate::error::{FairnessError, Result};
use crate::predicates::{
    check_length, masked_mean, not, positive_mask, resolve_mean, select, threshold_mask,
};
use ndarray::Array1;
use tracing::warn;

/// Fraction of examples whose thresholded score matches the label.
///
/// A score `>= threshold` is a positive prediction. Empty input yields NaN.
pub fn accuracy(labels: &Array1<f64>, scores: &Array1<f64>, threshold: f64) -> Result<f64> {
    accuracy_with_policy(labels, scores, threshold, DegeneratePolicy::Propagate)
}

/// [`accuracy`] with an explicit policy for empty input
pub fn accuracy_with_policy(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    threshold: f64,
    policy: DegeneratePolicy,
) -> Result<f64> {
    check_length("scores", labels.len(), scores.len())?;

    if labels.is_empty() {
        return match policy {
            DegeneratePolicy::Propagate => {
                warn!("Accuracy over empty input, returning NaN");
                Ok(f64::NAN)
            }
            DegeneratePolicy::Strict => Err(FairnessError::EmptyInput(
                "accuracy needs at least one example".to_string(),
            )),
        };
    }

    let predicted = threshold_mask(scores, threshold);
    let actual = positive_mask(labels);
    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    Ok(correct as f64 / labels.len() as f64)
}

/// Absolute difference in mean score between `attr == 0` and `attr == 1`.
///
/// NaN when either group is empty.
pub fn demographic_parity_prob(scores: &Array1<f64>, attr: &Array1<f64>) -> Result<f64> {
    demographic_parity_prob_with_policy(scores, attr, DegeneratePolicy::Propagate)
}

/// [`demographic_parity_prob`] with an explicit policy for empty groups
pub fn demographic_parity_prob_with_policy(
    scores: &Array1<f64>,
    attr: &Array1<f64>,
    policy: DegeneratePolicy,
) -> Result<f64> {
    check_length("attr", scores.len(), attr.len())?;

    let a_mask = positive_mask(attr);
    let mean_a0 = resolve_mean(masked_mean(scores, &not(&a_mask)), policy, "attr == 0")?;
    let mean_a1 = resolve_mean(masked_mean(scores, &a_mask), policy, "attr == 1")?;

    Ok((mean_a0 - mean_a1).abs())
}

/// Probability-level demographic parity among examples with `labels == 1`
pub fn equal_opportunity_prob(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    attr: &Array1<f64>,
) -> Result<f64> {
    equal_opportunity_prob_with_policy(labels, scores, attr, DegeneratePolicy::Propagate)
}

/// [`equal_opportunity_prob`] with an explicit policy for empty groups
pub fn equal_opportunity_prob_with_policy(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    attr: &Array1<f64>,
    policy: DegeneratePolicy,
) -> Result<f64> {
    check_length("scores", labels.len(), scores.len())?;
    check_length("attr", labels.len(), attr.len())?;

    let y_mask = positive_mask(labels);
    demographic_parity_prob_with_policy(&select(scores, &y_mask), &select(attr, &y_mask), policy)
}

/// Mean of the probability-level parity gaps on `labels == 0` and `labels == 1`
pub fn equalised_odds_prob(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    attr: &Array1<f64>,
) -> Result<f64> {
    equalised_odds_prob_with_policy(labels, scores, attr, DegeneratePolicy::Propagate)
}

/// [`equalised_odds_prob`] with an explicit policy for empty groups
pub fn equalised_odds_prob_with_policy(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    attr: &Array1<f64>,
    policy: DegeneratePolicy,
) -> Result<f64> {
    check_length("scores", labels.len(), scores.len())?;
    check_length("attr", labels.len(), attr.len())?;

    let y_mask = positive_mask(labels);
    let y0_mask = not(&y_mask);

    let gap_y0 = demographic_parity_prob_with_policy(
        &select(scores, &y0_mask),
        &select(attr, &y0_mask),
        policy,
    )?;
    let gap_y1 = demographic_parity_prob_with_policy(
        &select(scores, &y_mask),
        &select(attr, &y_mask),
        policy,
    )?;

    Ok((gap_y0 + gap_y1) / 2.0)
}

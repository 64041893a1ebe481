//! Conditional demographic parity
//!
//! The population is split by a grouping variable, a binary parity measure is
//! evaluated inside each group, and the per-group values are averaged without
//! weighting: a group of 5 counts as much as a group of 5000.

use super::parity::{DemographicParityDifference, DemographicParityRatio, ParityPrimitive};
use crate::config::DegeneratePolicy;
use crate::error::{FairnessError, Result};
use crate::predicates::{check_length, count, select};
use ndarray::Array1;
use std::collections::BTreeSet;
use tracing::debug;

/// Parity value of each distinct group, in ascending group order.
///
/// Errors from the primitive (e.g. a group containing only one attribute
/// value) are returned unchanged.
pub fn per_group_parity<'g, P, G>(
    primitive: &P,
    labels: &Array1<f64>,
    pred: &Array1<f64>,
    attr: &Array1<f64>,
    groups: &'g [G],
) -> Result<Vec<(&'g G, f64)>>
where
    P: ParityPrimitive + ?Sized,
    G: Ord,
{
    check_length("pred", labels.len(), pred.len())?;
    check_length("attr", labels.len(), attr.len())?;
    check_length("groups", labels.len(), groups.len())?;

    let distinct: BTreeSet<&G> = groups.iter().collect();
    let mut values = Vec::with_capacity(distinct.len());

    for (group_index, group) in distinct.into_iter().enumerate() {
        let mask: Array1<bool> = groups.iter().map(|g| g == group).collect();
        let value = primitive.compute(
            &select(labels, &mask),
            &select(pred, &mask),
            &select(attr, &mask),
        )?;

        debug!(
            metric = primitive.name(),
            group_index,
            group_size = count(&mask),
            value,
            "Computed per-group parity"
        );
        values.push((group, value));
    }

    Ok(values)
}

/// Unweighted mean of `primitive` over the distinct values of `groups`
pub fn conditional_demographic_parity<P, G>(
    primitive: &P,
    labels: &Array1<f64>,
    pred: &Array1<f64>,
    attr: &Array1<f64>,
    groups: &[G],
) -> Result<f64>
where
    P: ParityPrimitive + ?Sized,
    G: Ord,
{
    let values = per_group_parity(primitive, labels, pred, attr, groups)?;
    if values.is_empty() {
        return Err(FairnessError::EmptyInput(format!(
            "{} needs at least one group",
            primitive.name()
        )));
    }

    let sum: f64 = values.iter().map(|(_, v)| v).sum();
    Ok(sum / values.len() as f64)
}

/// Average demographic parity difference across the bins defined by `groups`
pub fn conditional_demographic_parity_difference<G: Ord>(
    labels: &Array1<f64>,
    pred: &Array1<f64>,
    attr: &Array1<f64>,
    groups: &[G],
) -> Result<f64> {
    conditional_demographic_parity(&DemographicParityDifference, labels, pred, attr, groups)
}

/// Average demographic parity ratio across the bins defined by `groups`.
///
/// A bin with no positive predictions contributes NaN, so the mean is NaN.
pub fn conditional_demographic_parity_ratio<G: Ord>(
    labels: &Array1<f64>,
    pred: &Array1<f64>,
    attr: &Array1<f64>,
    groups: &[G],
) -> Result<f64> {
    conditional_demographic_parity_ratio_with_policy(
        labels,
        pred,
        attr,
        groups,
        DegeneratePolicy::default(),
    )
}

/// [`conditional_demographic_parity_ratio`] with an explicit policy for 0/0 bins
pub fn conditional_demographic_parity_ratio_with_policy<G: Ord>(
    labels: &Array1<f64>,
    pred: &Array1<f64>,
    attr: &Array1<f64>,
    groups: &[G],
    policy: DegeneratePolicy,
) -> Result<f64> {
    let primitive = DemographicParityRatio::new(policy);
    conditional_demographic_parity(&primitive, labels, pred, attr, groups)
}

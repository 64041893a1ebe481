//! Calibration across protected groups
//!
//! Scores are split into `n_bins` equal-width bins over [0, 1]. Within each
//! bin the share of positive labels is computed separately for each group and
//! the two shares are compared.
//!
//! Bins are open on both ends: a score exactly on an edge (including 0.0 and
//! 1.0) is not counted in any bin. A group with no positives in a bin gets a
//! proportion of 0.0 for that bin, empty bins included.

use crate::error::{FairnessError, Result};
use crate::predicates::{check_length, is_one};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Per-bin share of positive labels for each protected group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProportions {
    /// Group `attr == 0`, ordered by bin
    pub y1_in_a0: Vec<f64>,
    /// Group `attr == 1`, ordered by bin
    pub y1_in_a1: Vec<f64>,
}

/// Per-bin counts for one protected group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBinCounts {
    /// Examples with `labels == 1` in each bin
    pub positives: Vec<usize>,
    /// All examples in each bin
    pub totals: Vec<usize>,
}

impl GroupBinCounts {
    fn new(n_bins: usize) -> Self {
        Self {
            positives: vec![0; n_bins],
            totals: vec![0; n_bins],
        }
    }

    /// Positive share per bin, 0.0 where the bin has no positives
    pub fn proportions(&self) -> Vec<f64> {
        self.positives
            .iter()
            .zip(self.totals.iter())
            .map(|(&pos, &total)| {
                if pos > 0 {
                    pos as f64 / total as f64
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Binned counts behind the calibration score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBins {
    /// `n_bins + 1` edges, `bin_edges[i] = i / n_bins`
    pub bin_edges: Vec<f64>,
    /// Counts for `attr == 0`
    pub a0: GroupBinCounts,
    /// Counts for `attr == 1`
    pub a1: GroupBinCounts,
}

impl CalibrationBins {
    /// Number of bins, 0 if `bin_edges` has fewer than two edges
    pub fn n_bins(&self) -> usize {
        self.bin_edges.len().saturating_sub(1)
    }

    /// Examples that fell strictly inside some bin, both groups
    pub fn binned_count(&self) -> usize {
        self.a0.totals.iter().sum::<usize>() + self.a1.totals.iter().sum::<usize>()
    }

    /// Positive share per bin for both groups
    pub fn proportions(&self) -> CalibrationProportions {
        CalibrationProportions {
            y1_in_a0: self.a0.proportions(),
            y1_in_a1: self.a1.proportions(),
        }
    }

    /// `1 - mean_bins |p_a0 - p_a1|`; 1.0 means both groups agree in every bin.
    ///
    /// NaN when there are no bins.
    pub fn score(&self) -> f64 {
        score_from_proportions(&self.proportions(), self.n_bins())
    }
}

fn score_from_proportions(proportions: &CalibrationProportions, n_bins: usize) -> f64 {
    let total_gap: f64 = proportions
        .y1_in_a0
        .iter()
        .zip(proportions.y1_in_a1.iter())
        .map(|(p0, p1)| (p0 - p1).abs())
        .sum();

    1.0 - total_gap / n_bins as f64
}

/// Count positives and totals per bin and protected group
pub fn calibration_bins(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    attr: &Array1<f64>,
    n_bins: usize,
) -> Result<CalibrationBins> {
    check_length("scores", labels.len(), scores.len())?;
    check_length("attr", labels.len(), attr.len())?;
    if n_bins == 0 {
        return Err(FairnessError::InvalidParameter {
            name: "n_bins".to_string(),
            value: n_bins.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let bin_edges: Vec<f64> = (0..=n_bins).map(|i| i as f64 / n_bins as f64).collect();
    let mut a0 = GroupBinCounts::new(n_bins);
    let mut a1 = GroupBinCounts::new(n_bins);

    for (bin, edges) in bin_edges.windows(2).enumerate() {
        let (lo, hi) = (edges[0], edges[1]);

        for ((&y, &s), &a) in labels.iter().zip(scores.iter()).zip(attr.iter()) {
            if !(s > lo && s < hi) {
                continue;
            }
            let counts = if is_one(a) { &mut a1 } else { &mut a0 };
            counts.totals[bin] += 1;
            if is_one(y) {
                counts.positives[bin] += 1;
            }
        }
    }

    Ok(CalibrationBins { bin_edges, a0, a1 })
}

/// Calibration score and per-bin positive shares for both protected groups.
///
/// Returns `1.0 - (sum over bins of |p_a0 - p_a1|) / n_bins`.
pub fn calibration(
    labels: &Array1<f64>,
    scores: &Array1<f64>,
    attr: &Array1<f64>,
    n_bins: usize,
) -> Result<(f64, CalibrationProportions)> {
    let bins = calibration_bins(labels, scores, attr, n_bins)?;
    let proportions = bins.proportions();
    let score = score_from_proportions(&proportions, n_bins);
    Ok((score, proportions))
}

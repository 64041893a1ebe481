//! Kolosal Fairness - group-fairness diagnostics for binary classifiers
//!
//! This crate measures how a model's predictions or predicted probabilities
//! differ between the two values of a binary protected attribute:
//! - Accuracy and probability-level demographic parity
//! - Equal opportunity and equalised odds on predicted probabilities
//! - Conditional demographic parity (difference and ratio) over a grouping variable
//! - Calibration agreement between groups across score bins
//!
//! All inputs are aligned `ndarray::Array1<f64>` values (labels, scores,
//! predictions and the attribute encoded as 0.0/1.0). Every metric is a pure
//! function of its inputs.
//!
//! # Modules
//!
//! - [`fairness`] - Metric functions, [`FairnessEvaluator`] and [`FairnessReport`]
//! - [`predicates`] - Thresholding, masks and masked reductions
//! - [`config`] - Evaluation configuration and degenerate-input policy
//! - [`error`] - Error type and result alias
//!
//! [`FairnessEvaluator`]: fairness::FairnessEvaluator
//! [`FairnessReport`]: fairness::FairnessReport

pub mod error;
pub mod config;
pub mod predicates;
pub mod fairness;

pub use error::{FairnessError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{FairnessError, Result};

    // Configuration
    pub use crate::config::{DegeneratePolicy, FairnessConfig, DEFAULT_N_BINS, DEFAULT_THRESHOLD};

    // Unconditional metrics
    pub use crate::fairness::{
        accuracy, calibration, demographic_parity_prob, equal_opportunity_prob,
        equalised_odds_prob,
    };

    // Conditional metrics
    pub use crate::fairness::{
        conditional_demographic_parity, conditional_demographic_parity_difference,
        conditional_demographic_parity_ratio, conditional_demographic_parity_ratio_with_policy,
        DemographicParityDifference, DemographicParityRatio, ParityPrimitive,
    };

    // Evaluation
    pub use crate::fairness::{
        CalibrationProportions, CandidateScores, FairnessEvaluator, FairnessReport,
    };

    pub use crate::predicates::binarize;
}

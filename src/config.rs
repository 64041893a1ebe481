//! Fairness evaluation configuration

use crate::error::{FairnessError, Result};
use serde::{Deserialize, Serialize};

/// Default decision threshold used to binarize scores
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default number of calibration bins
pub const DEFAULT_N_BINS: usize = 10;

/// How probability-level metrics treat a subgroup with no examples
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Return NaN for the undefined mean
    #[default]
    Propagate,
    /// Return an error for the undefined mean
    Strict,
}

/// Configuration for fairness evaluation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FairnessConfig {
    /// Score at or above which a prediction is positive
    pub threshold: f64,
    /// Number of equal-width calibration bins over [0, 1]
    pub n_bins: usize,
    /// Handling of empty protected subgroups
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            n_bins: DEFAULT_N_BINS,
            degenerate_policy: DegeneratePolicy::default(),
        }
    }
}

impl FairnessConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decision threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the number of calibration bins
    pub fn with_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }

    /// Set the degenerate-input policy
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Check that the configuration can drive an evaluation
    pub fn validate(&self) -> Result<()> {
        if self.n_bins == 0 {
            return Err(FairnessError::ConfigError(
                "n_bins must be at least 1".to_string(),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(FairnessError::ConfigError(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FairnessConfig::default();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.n_bins, 10);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Propagate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = FairnessConfig::new()
            .with_threshold(0.7)
            .with_n_bins(5)
            .with_degenerate_policy(DegeneratePolicy::Strict);
        assert_eq!(config.threshold, 0.7);
        assert_eq!(config.n_bins, 5);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Strict);
    }

    #[test]
    fn test_validate_zero_bins() {
        let config = FairnessConfig::new().with_n_bins(0);
        assert!(matches!(config.validate(), Err(FairnessError::ConfigError(_))));
    }

    #[test]
    fn test_validate_nan_threshold() {
        let config = FairnessConfig::new().with_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = FairnessConfig::from_json(r#"{"n_bins": 20, "degenerate_policy": "strict"}"#)
            .unwrap();
        assert_eq!(config.n_bins, 20);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Strict);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(FairnessConfig::from_json(r#"{"n_bins": 0}"#).is_err());
        assert!(matches!(
            FairnessConfig::from_json("not json"),
            Err(FairnessError::SerializationError(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = FairnessConfig::new().with_threshold(0.3);
        let json = config.to_json().unwrap();
        assert_eq!(FairnessConfig::from_json(&json).unwrap(), config);
    }
}

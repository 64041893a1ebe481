//! Error types for the Kolosal fairness metrics

use thiserror::Error;

/// Result type alias for fairness operations
pub type Result<T> = std::result::Result<T, FairnessError>;

/// Main error type for fairness metric computation
#[derive(Error, Debug)]
pub enum FairnessError {
    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Empty subgroup: {0}")]
    EmptySubgroup(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FairnessError {
    fn from(err: serde_json::Error) -> Self {
        FairnessError::SerializationError(err.to_string())
    }
}

impl FairnessError {
    /// Length mismatch between two aligned arrays
    pub(crate) fn length_mismatch(name: &str, expected: usize, actual: usize) -> Self {
        FairnessError::ShapeError {
            expected: format!("{} of length {}", name, expected),
            actual: format!("length {}", actual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FairnessError::EmptySubgroup("attr == 1".to_string());
        assert_eq!(err.to_string(), "Empty subgroup: attr == 1");
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = FairnessError::length_mismatch("scores", 4, 3);
        assert_eq!(
            err.to_string(),
            "Invalid shape: expected scores of length 4, got length 3"
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FairnessError = json_err.into();
        assert!(matches!(err, FairnessError::SerializationError(_)));
    }
}

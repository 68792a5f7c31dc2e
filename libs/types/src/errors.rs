//! Error types for the fee engine
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Configuration or input is malformed.
///
/// Always returned, never raised as a panic. A payment pipeline receiving
/// one of these must not charge a zero fee in its place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid {field}: {value} is not an integer")]
    NonIntegerAmount { field: String, value: String },

    #[error("Invalid {field}: {value} is outside the safe integer range")]
    UnsafeInteger { field: String, value: String },

    #[error("Invalid tiered fee configuration: {count} tiers have no maxAmount, at most one allowed")]
    MultipleCatchAllTiers { count: usize },

    #[error("Invalid params for {strategy} strategy: {reason}")]
    InvalidParams { strategy: String, reason: String },

    #[error("Calculated bank fee is negative: {fee}")]
    NegativeFee { fee: String },

    #[error("Non-finite value while computing {stage}")]
    NonFiniteFee { stage: String },

    #[error("Amount out of range while computing {stage}")]
    AmountOutOfRange { stage: String },
}

/// Fee configuration loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Config parse error: {message}")]
    Parse { message: String },

    #[error("Unknown payout queue: {queue_name}")]
    UnknownQueue { queue_name: String },

    #[error("No payout queue configured for speed {speed}")]
    NoQueueForSpeed { speed: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_integer_display() {
        let err = ValidationError::NonIntegerAmount {
            field: "amount".to_string(),
            value: "10.5".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid amount: 10.5 is not an integer");
    }

    #[test]
    fn test_catch_all_tiers_display() {
        let err = ValidationError::MultipleCatchAllTiers { count: 2 };
        assert!(err.to_string().contains("2 tiers"));
    }

    #[test]
    fn test_config_error_from_validation_error() {
        let err: ConfigError = ValidationError::MultipleCatchAllTiers { count: 3 }.into();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_config_error_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

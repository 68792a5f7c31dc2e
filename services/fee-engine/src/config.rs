//! Fee policy configuration
//!
//! Loaded once at startup from JSON. Strategy entries stay in their raw
//! `{ name, strategy, params }` form until a calculator is requested, so a
//! config carrying strategy types from a newer build still loads.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use types::errors::ConfigError;
use types::fee::RawFeeStrategySpec;

use crate::composite::CompositeFeeCalculator;

/// Confirmation target of an on-chain payout queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayoutSpeed {
    Fast,
    Medium,
    Slow,
}

impl fmt::Display for PayoutSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoutSpeed::Fast => write!(f, "fast"),
            PayoutSpeed::Medium => write!(f, "medium"),
            PayoutSpeed::Slow => write!(f, "slow"),
        }
    }
}

/// Fee policy of one payout queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutQueueFeeConfig {
    pub queue_name: String,
    pub speed: PayoutSpeed,
    #[serde(default)]
    pub strategies: Vec<RawFeeStrategySpec>,
}

/// Fee engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfig {
    /// Strategy chain applied to on-chain withdrawals
    #[serde(default)]
    pub withdraw: Vec<RawFeeStrategySpec>,
    #[serde(default)]
    pub payout_queues: Vec<PayoutQueueFeeConfig>,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            withdraw: vec![RawFeeStrategySpec {
                name: "Imbalance".to_string(),
                strategy: "imbalance".to_string(),
                params: json!({
                    "threshold": 1_000_000,
                    "ratioAsBasisPoints": 50,
                    "minFee": 2_000,
                    "daysLookback": 30
                }),
            }],
            payout_queues: Vec::new(),
        }
    }
}

impl FeeConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn withdraw_calculator(&self) -> Result<CompositeFeeCalculator, ConfigError> {
        Ok(CompositeFeeCalculator::from_raw(&self.withdraw)?)
    }

    /// Look up a payout queue by name
    pub fn queue(&self, queue_name: &str) -> Result<&PayoutQueueFeeConfig, ConfigError> {
        self.payout_queues
            .iter()
            .find(|q| q.queue_name == queue_name)
            .ok_or_else(|| ConfigError::UnknownQueue {
                queue_name: queue_name.to_string(),
            })
    }

    /// First payout queue configured for `speed`
    pub fn queue_for_speed(&self, speed: PayoutSpeed) -> Result<&PayoutQueueFeeConfig, ConfigError> {
        self.payout_queues
            .iter()
            .find(|q| q.speed == speed)
            .ok_or_else(|| ConfigError::NoQueueForSpeed {
                speed: speed.to_string(),
            })
    }

    pub fn queue_calculator(&self, queue_name: &str) -> Result<CompositeFeeCalculator, ConfigError> {
        let queue = self.queue(queue_name)?;
        Ok(CompositeFeeCalculator::from_raw(&queue.strategies)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_withdraw_policy() {
        let config = FeeConfig::default();
        let calculator = config.withdraw_calculator().unwrap();
        assert_eq!(calculator.names(), vec!["Imbalance"]);
        assert!(config.payout_queues.is_empty());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let config = FeeConfig::from_json_str("{}").unwrap();
        assert!(config.withdraw.is_empty());
        assert!(config.payout_queues.is_empty());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            FeeConfig::from_json_str("{ withdraw: "),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_speed_serialization() {
        assert_eq!(serde_json::to_string(&PayoutSpeed::Medium).unwrap(), "\"medium\"");
        assert_eq!(PayoutSpeed::Slow.to_string(), "slow");
    }
}

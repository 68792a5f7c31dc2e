//! Strategy dispatch
//!
//! A `FeeStrategy` is a validated, immutable strategy instance. Building
//! one from `FeeStrategyParams` runs every construction-time check; after
//! that, `calculate` only fails on exponential-decay numeric edge cases.

use types::errors::ValidationError;
use types::fee::{FeeCalculationContext, FeeStrategyParams, FeeStrategyType};
use types::numeric::BtcPaymentAmount;

use crate::exponential_decay::ExponentialDecayFeeStrategy;
use crate::flat::FlatFeeStrategy;
use crate::imbalance::ImbalanceFeeStrategy;
use crate::internal::InternalAccountFeeStrategy;
use crate::percentage::PercentageFeeStrategy;
use crate::tiered::TieredFeeStrategy;

#[derive(Debug, Clone, PartialEq)]
pub enum FeeStrategy {
    Flat(FlatFeeStrategy),
    Percentage(PercentageFeeStrategy),
    TieredFlat(TieredFeeStrategy),
    Internal(InternalAccountFeeStrategy),
    Imbalance(ImbalanceFeeStrategy),
    ExponentialDecay(ExponentialDecayFeeStrategy),
}

impl FeeStrategy {
    /// Validate params and build the matching strategy
    pub fn from_params(params: &FeeStrategyParams) -> Result<Self, ValidationError> {
        let strategy = match params {
            FeeStrategyParams::Flat(p) => FeeStrategy::Flat(FlatFeeStrategy::new(p)?),
            FeeStrategyParams::Percentage(p) => {
                FeeStrategy::Percentage(PercentageFeeStrategy::new(p)?)
            }
            FeeStrategyParams::TieredFlat(p) => FeeStrategy::TieredFlat(TieredFeeStrategy::new(p)?),
            FeeStrategyParams::Internal(p) => {
                FeeStrategy::Internal(InternalAccountFeeStrategy::new(p))
            }
            FeeStrategyParams::Imbalance(p) => {
                FeeStrategy::Imbalance(ImbalanceFeeStrategy::new(p)?)
            }
            FeeStrategyParams::ExponentialDecay(p) => {
                FeeStrategy::ExponentialDecay(ExponentialDecayFeeStrategy::new(p)?)
            }
        };
        Ok(strategy)
    }

    pub fn strategy_type(&self) -> FeeStrategyType {
        match self {
            FeeStrategy::Flat(_) => FeeStrategyType::Flat,
            FeeStrategy::Percentage(_) => FeeStrategyType::Percentage,
            FeeStrategy::TieredFlat(_) => FeeStrategyType::TieredFlat,
            FeeStrategy::Internal(_) => FeeStrategyType::Internal,
            FeeStrategy::Imbalance(_) => FeeStrategyType::Imbalance,
            FeeStrategy::ExponentialDecay(_) => FeeStrategyType::ExponentialDecay,
        }
    }

    /// Contribution of this strategy given the running total in `ctx`
    pub fn calculate(
        &self,
        ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        match self {
            FeeStrategy::Flat(s) => s.calculate(ctx),
            FeeStrategy::Percentage(s) => s.calculate(ctx),
            FeeStrategy::TieredFlat(s) => s.calculate(ctx),
            FeeStrategy::Internal(s) => s.calculate(ctx),
            FeeStrategy::Imbalance(s) => s.calculate(ctx),
            FeeStrategy::ExponentialDecay(s) => s.calculate(ctx),
        }
    }
}

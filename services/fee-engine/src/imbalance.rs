//! Imbalance surcharge strategy
//!
//! Charges payments that push a wallet's net outflow over the lookback
//! window beyond a threshold:
//!
//! ```text
//! base = max(min(imbalance + payment - threshold, payment), 0)
//! fee  = max(min_fee, base * ratio_bp / 10000)
//! ```

use chrono::{DateTime, Duration, Utc};
use types::errors::ValidationError;
use types::fee::{FeeCalculationContext, ImbalanceFeeStrategyParams};
use types::numeric::BtcPaymentAmount;

use crate::validator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImbalanceFeeStrategy {
    threshold: BtcPaymentAmount,
    ratio_as_basis_points: i64,
    min_fee: BtcPaymentAmount,
    days_lookback: u32,
}

impl ImbalanceFeeStrategy {
    pub fn new(params: &ImbalanceFeeStrategyParams) -> Result<Self, ValidationError> {
        let ratio_as_basis_points =
            validator::require_integer(params.ratio_as_basis_points, "ratioAsBasisPoints")?;
        let threshold = validator::require_amount(params.threshold, "threshold")?;
        let min_fee = validator::require_amount(params.min_fee, "minFee")?;

        Ok(Self {
            threshold,
            ratio_as_basis_points,
            min_fee,
            days_lookback: params.days_lookback,
        })
    }

    pub fn days_lookback(&self) -> u32 {
        self.days_lookback
    }

    /// Start of the window over which the caller measures the imbalance
    pub fn lookback_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days_lookback))
    }

    /// Zero when the context carries no imbalance.
    pub fn calculate(
        &self,
        ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        let Some(imbalance) = ctx.imbalance else {
            return Ok(BtcPaymentAmount::zero());
        };
        let payment = ctx.payment_amount;

        let over_threshold = &(imbalance + payment) - &self.threshold;
        let base_amount = over_threshold
            .min(payment.clone())
            .max(BtcPaymentAmount::zero());

        let calculated = base_amount.mul_basis_points(self.ratio_as_basis_points);
        Ok(self.min_fee.clone().max(calculated))
    }
}

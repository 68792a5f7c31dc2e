//! Flat fee strategy

use types::errors::ValidationError;
use types::fee::{FeeCalculationContext, FlatFeeStrategyParams};
use types::numeric::BtcPaymentAmount;

use crate::validator;

/// Charges a constant amount; a negative amount is a discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatFeeStrategy {
    amount: BtcPaymentAmount,
}

impl FlatFeeStrategy {
    /// Fails if `amount` is not an integer satoshi value.
    pub fn new(params: &FlatFeeStrategyParams) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: validator::require_amount(params.amount, "amount")?,
        })
    }

    pub fn amount(&self) -> &BtcPaymentAmount {
        &self.amount
    }

    pub fn calculate(
        &self,
        _ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        Ok(self.amount.clone())
    }
}

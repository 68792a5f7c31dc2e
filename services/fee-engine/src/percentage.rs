//! Percentage fee strategy

use types::errors::ValidationError;
use types::fee::{FeeCalculationContext, PercentageFeeStrategyParams};
use types::numeric::BtcPaymentAmount;

use crate::validator;

/// Charges `payment_amount * basis_points / 10000`.
///
/// Basis points may be negative or exceed 10000. Rounding follows
/// `PaymentAmount::mul_basis_points` (half away from zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentageFeeStrategy {
    basis_points: i64,
}

impl PercentageFeeStrategy {
    pub fn new(params: &PercentageFeeStrategyParams) -> Result<Self, ValidationError> {
        Ok(Self {
            basis_points: validator::require_integer(params.basis_points, "basisPoints")?,
        })
    }

    pub fn basis_points(&self) -> i64 {
        self.basis_points
    }

    pub fn calculate(
        &self,
        ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        Ok(ctx.payment_amount.mul_basis_points(self.basis_points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::account::{Account, Wallet};
    use types::fee::{FeeRequest, NetworkFee};
    use types::numeric::WalletCurrency;

    fn make_request(payment: i64) -> FeeRequest {
        FeeRequest::new(
            BtcPaymentAmount::new(payment),
            NetworkFee::new(BtcPaymentAmount::new(100), 10.0),
            Account::new("accountId"),
            Wallet::new("walletId", WalletCurrency::Btc),
        )
    }

    fn fee_for(basis_points: f64, payment: i64) -> BtcPaymentAmount {
        let strategy = PercentageFeeStrategy::new(&PercentageFeeStrategyParams { basis_points })
            .unwrap();
        let request = make_request(payment);
        let zero = BtcPaymentAmount::zero();
        strategy.calculate(&request.context(&zero)).unwrap()
    }

    #[test]
    fn test_one_percent() {
        assert_eq!(fee_for(100.0, 100_000), BtcPaymentAmount::new(1_000));
    }

    #[test]
    fn test_ten_basis_points() {
        assert_eq!(fee_for(10.0, 100_000), BtcPaymentAmount::new(100));
    }

    #[test]
    fn test_negative_and_above_full() {
        assert_eq!(fee_for(-50.0, 100_000), BtcPaymentAmount::new(-500));
        assert_eq!(fee_for(15_000.0, 1_000), BtcPaymentAmount::new(1_500));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 1 bp of 5_000 sats = 0.5 sat
        assert_eq!(fee_for(1.0, 5_000), BtcPaymentAmount::new(1));
        // 1 bp of 4_999 sats = 0.4999 sat
        assert_eq!(fee_for(1.0, 4_999), BtcPaymentAmount::new(0));
    }

    #[test]
    fn test_non_integer_basis_points_rejected() {
        let err = PercentageFeeStrategy::new(&PercentageFeeStrategyParams { basis_points: 12.5 })
            .unwrap_err();
        assert!(matches!(err, ValidationError::NonIntegerAmount { .. }));
    }
}

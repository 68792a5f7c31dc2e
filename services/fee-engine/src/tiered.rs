//! Tiered flat fee strategy

use types::errors::ValidationError;
use types::fee::{FeeCalculationContext, TieredFlatFeeStrategyParams};
use types::numeric::BtcPaymentAmount;

use crate::validator::{self, ValidatedTier};

/// Charges the flat amount of the first tier covering the payment amount.
///
/// Tiers are sorted once at construction; the catch-all tier (no
/// `max_amount`) is checked last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredFeeStrategy {
    tiers: Vec<ValidatedTier>,
}

impl TieredFeeStrategy {
    pub fn new(params: &TieredFlatFeeStrategyParams) -> Result<Self, ValidationError> {
        Ok(Self {
            tiers: validator::validate_tiers(&params.tiers)?,
        })
    }

    /// Tiers in evaluation order
    pub fn tiers(&self) -> &[ValidatedTier] {
        &self.tiers
    }

    pub fn calculate(
        &self,
        ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        let matched = self.tiers.iter().find(|tier| match &tier.max_amount {
            None => true,
            Some(max) => ctx.payment_amount <= max,
        });

        Ok(matched
            .map(|tier| tier.amount.clone())
            .unwrap_or_else(BtcPaymentAmount::zero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::account::{Account, Wallet};
    use types::fee::{FeeRequest, FeeTier, NetworkFee};
    use types::numeric::WalletCurrency;

    fn make_request(payment: i64) -> FeeRequest {
        FeeRequest::new(
            BtcPaymentAmount::new(payment),
            NetworkFee::new(BtcPaymentAmount::new(100), 10.0),
            Account::new("accountId"),
            Wallet::new("walletId", WalletCurrency::Btc),
        )
    }

    fn standard_strategy() -> TieredFeeStrategy {
        TieredFeeStrategy::new(&TieredFlatFeeStrategyParams {
            tiers: vec![
                FeeTier { max_amount: Some(50_000.0), amount: 200.0 },
                FeeTier { max_amount: None, amount: 400.0 },
            ],
        })
        .unwrap()
    }

    fn fee_for(strategy: &TieredFeeStrategy, payment: i64) -> BtcPaymentAmount {
        let request = make_request(payment);
        let zero = BtcPaymentAmount::zero();
        strategy.calculate(&request.context(&zero)).unwrap()
    }

    #[test]
    fn test_lower_tier() {
        assert_eq!(fee_for(&standard_strategy(), 40_000), BtcPaymentAmount::new(200));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert_eq!(fee_for(&standard_strategy(), 50_000), BtcPaymentAmount::new(200));
        assert_eq!(fee_for(&standard_strategy(), 50_001), BtcPaymentAmount::new(400));
    }

    #[test]
    fn test_catch_all_tier() {
        assert_eq!(fee_for(&standard_strategy(), 60_000), BtcPaymentAmount::new(400));
    }

    #[test]
    fn test_unsorted_config() {
        let strategy = TieredFeeStrategy::new(&TieredFlatFeeStrategyParams {
            tiers: vec![
                FeeTier { max_amount: None, amount: 900.0 },
                FeeTier { max_amount: Some(1_000_000.0), amount: 500.0 },
                FeeTier { max_amount: Some(10_000.0), amount: 50.0 },
            ],
        })
        .unwrap();

        assert_eq!(fee_for(&strategy, 5_000), BtcPaymentAmount::new(50));
        assert_eq!(fee_for(&strategy, 500_000), BtcPaymentAmount::new(500));
        assert_eq!(fee_for(&strategy, 5_000_000), BtcPaymentAmount::new(900));
    }

    #[test]
    fn test_no_matching_tier_is_zero() {
        let strategy = TieredFeeStrategy::new(&TieredFlatFeeStrategyParams {
            tiers: vec![FeeTier { max_amount: Some(10_000.0), amount: 50.0 }],
        })
        .unwrap();
        assert_eq!(fee_for(&strategy, 20_000), BtcPaymentAmount::zero());
    }

    #[test]
    fn test_two_catch_all_tiers_rejected() {
        let err = TieredFeeStrategy::new(&TieredFlatFeeStrategyParams {
            tiers: vec![
                FeeTier { max_amount: None, amount: 500.0 },
                FeeTier { max_amount: None, amount: 1_000.0 },
            ],
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MultipleCatchAllTiers { count: 2 });
    }
}

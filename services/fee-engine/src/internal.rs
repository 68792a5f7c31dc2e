//! Internal account discount strategy

use std::collections::HashSet;

use types::account::AccountRole;
use types::errors::ValidationError;
use types::fee::{FeeCalculationContext, InternalAccountFeeStrategyParams};
use types::ids::AccountId;
use types::numeric::BtcPaymentAmount;

/// Cancels the running total for exempt accounts.
///
/// Returns `-previous_fee` when the account id or role is listed, zero
/// otherwise. Only strategies placed before this one in a composite chain
/// are cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalAccountFeeStrategy {
    roles: HashSet<AccountRole>,
    account_ids: HashSet<AccountId>,
}

impl InternalAccountFeeStrategy {
    pub fn new(params: &InternalAccountFeeStrategyParams) -> Self {
        Self {
            roles: params.roles.iter().cloned().collect(),
            account_ids: params.account_ids.iter().cloned().collect(),
        }
    }

    /// Check whether the account is exempt
    pub fn is_exempt(&self, ctx: &FeeCalculationContext<'_>) -> bool {
        let exempt_id = self.account_ids.contains(&ctx.account.id);
        let exempt_role = self.roles.iter().any(|role| ctx.account.has_role(role));
        exempt_id || exempt_role
    }

    pub fn calculate(
        &self,
        ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        if self.is_exempt(ctx) {
            return Ok(ctx.previous_fee * -1);
        }
        Ok(BtcPaymentAmount::zero())
    }
}

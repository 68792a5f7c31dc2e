//! Strategy parameter validation
//!
//! Runs once, when a strategy is built from config. Per-payment evaluation
//! never re-checks these constraints.

use std::cmp::Ordering;

use types::errors::ValidationError;
use types::fee::FeeTier;
use types::numeric::{BtcPaymentAmount, MAX_SAFE_INTEGER};

/// A tier whose numbers are known to be integer satoshi amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTier {
    /// `None` is the catch-all tier
    pub max_amount: Option<BtcPaymentAmount>,
    pub amount: BtcPaymentAmount,
}

/// Require an integer inside the safe-integer range.
pub fn require_integer(value: f64, field: &str) -> Result<i64, ValidationError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ValidationError::NonIntegerAmount {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value.abs() > MAX_SAFE_INTEGER {
        return Err(ValidationError::UnsafeInteger {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value as i64)
}

/// Require an integer satoshi amount.
pub fn require_amount(value: f64, field: &str) -> Result<BtcPaymentAmount, ValidationError> {
    BtcPaymentAmount::from_number(value, field)
}

/// Require a finite number (rates and factors may be fractional).
pub fn require_finite(value: f64, strategy: &str, field: &str) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidParams {
            strategy: strategy.to_string(),
            reason: format!("{field} must be finite, got {value}"),
        })
    }
}

/// Validate tiers and sort them ascending by `max_amount`.
///
/// A missing `max_amount` sorts after every bounded tier. Equal bounds keep
/// their config order. At most one catch-all tier is allowed.
pub fn validate_tiers(tiers: &[FeeTier]) -> Result<Vec<ValidatedTier>, ValidationError> {
    let catch_all_count = tiers.iter().filter(|t| t.max_amount.is_none()).count();
    if catch_all_count > 1 {
        return Err(ValidationError::MultipleCatchAllTiers {
            count: catch_all_count,
        });
    }

    let mut validated = tiers
        .iter()
        .map(|tier| -> Result<ValidatedTier, ValidationError> {
            let max_amount = tier
                .max_amount
                .map(|max| require_amount(max, "tier maxAmount"))
                .transpose()?;
            let amount = require_amount(tier.amount, "tier amount")?;
            Ok(ValidatedTier { max_amount, amount })
        })
        .collect::<Result<Vec<_>, _>>()?;

    validated.sort_by(|a, b| compare_tier_bounds(&a.max_amount, &b.max_amount));
    Ok(validated)
}

fn compare_tier_bounds(a: &Option<BtcPaymentAmount>, b: &Option<BtcPaymentAmount>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

//! Exponential decay fee strategy
//!
//! The fee rate decays with payment size and is blended toward a target
//! rate as the network fee rate rises:
//!
//! ```text
//! decay(a)    = min + (max - min) * e^(-((a - base) / (start - base)) * speed)   a < start
//!             = divisor / a                                                      a >= start
//! norm(r)     = (r - min_fee_rate) / (max_fee_rate - min_fee_rate)
//! rate(a, r)  = decay(a) + norm(r) * (target - decay(a))
//! mult(r)     = factor / r + offset
//! bank_fee    = ceil(a * rate(a, r) + miner_fee * mult(r))
//! ```
//!
//! Rates are computed in f64. The final multiply/add/ceil runs in
//! `Decimal` so satoshi values above 2^53 are not truncated. Payment and
//! miner amounts are clamped to `MAX_DECAY_INPUT_SATS` first.
//!
//! The returned amount includes the miner-fee markup term and is not
//! reduced by the miner fee itself; the composite calculator adds it on top
//! of the network fee.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::warn;
use types::errors::ValidationError;
use types::fee::{ExponentialDecayFeeStrategyParams, FeeCalculationContext};
use types::numeric::BtcPaymentAmount;

use crate::validator;

/// Fee rates at or below this are treated as zero by the multiplier.
pub const MIN_FEE_RATE: f64 = 1e-8;

/// Largest satoshi value fed into the rate computation.
pub const MAX_DECAY_INPUT_SATS: u64 = u64::MAX;

/// Tolerated jump of `decay_rate` at `decay_start_amount`, in rate units.
pub const DECAY_CONTINUITY_EPSILON: f64 = 1e-6;

const STRATEGY: &str = "exponentialDecay";

#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialDecayFeeStrategy {
    params: ExponentialDecayFeeStrategyParams,
}

impl ExponentialDecayFeeStrategy {
    /// Every parameter must be finite. No cross-field checks: an empty decay
    /// span or fee-rate range degrades to `min_rate` / a zero blend factor.
    pub fn new(params: &ExponentialDecayFeeStrategyParams) -> Result<Self, ValidationError> {
        let fields = [
            ("minRate", params.min_rate),
            ("maxRate", params.max_rate),
            ("decayStartAmount", params.decay_start_amount),
            ("baseAmount", params.base_amount),
            ("decaySpeed", params.decay_speed),
            ("terminalDivisor", params.terminal_divisor),
            ("targetFeeRate", params.target_fee_rate),
            ("minFeeRate", params.min_fee_rate),
            ("maxFeeRate", params.max_fee_rate),
            ("networkFeeOffset", params.network_fee_offset),
            ("networkFeeFactor", params.network_fee_factor),
        ];
        for (field, value) in fields {
            validator::require_finite(value, STRATEGY, field)?;
        }

        let strategy = Self {
            params: params.clone(),
        };

        let gap = strategy.boundary_gap();
        if gap > DECAY_CONTINUITY_EPSILON {
            warn!(
                decay_start_amount = params.decay_start_amount,
                gap,
                "Exponential decay rate is discontinuous at decay start amount"
            );
        }

        Ok(strategy)
    }

    pub fn params(&self) -> &ExponentialDecayFeeStrategyParams {
        &self.params
    }

    /// Size-based fee rate for a payment of `amount` sats.
    pub fn decay_rate(&self, amount: f64) -> f64 {
        if amount == 0.0 {
            return 0.0;
        }
        if amount < self.params.decay_start_amount {
            return self.exponential_decay(amount);
        }
        self.params.terminal_divisor / amount
    }

    fn exponential_decay(&self, amount: f64) -> f64 {
        let p = &self.params;
        let span = p.decay_start_amount - p.base_amount;
        if span <= 0.0 {
            return p.min_rate;
        }
        let exponent = -((amount - p.base_amount) / span) * p.decay_speed;
        p.min_rate + (p.max_rate - p.min_rate) * exponent.exp()
    }

    /// Position of `fee_rate` within `[min_fee_rate, max_fee_rate]`.
    ///
    /// Not clamped to `[0, 1]`; zero when the range is empty.
    pub fn normalized_factor(&self, fee_rate: f64) -> f64 {
        let range = self.params.max_fee_rate - self.params.min_fee_rate;
        if range <= 0.0 {
            return 0.0;
        }
        (fee_rate - self.params.min_fee_rate) / range
    }

    /// Decay rate blended toward `target_fee_rate` by network congestion.
    pub fn dynamic_rate(&self, amount: f64, fee_rate: f64) -> f64 {
        let decay = self.decay_rate(amount);
        decay + self.normalized_factor(fee_rate) * (self.params.target_fee_rate - decay)
    }

    /// Markup applied to the miner fee.
    pub fn base_multiplier(&self, fee_rate: f64) -> f64 {
        if fee_rate.abs() <= MIN_FEE_RATE {
            return self.params.network_fee_offset;
        }
        self.params.network_fee_factor / fee_rate + self.params.network_fee_offset
    }

    /// Jump of `decay_rate` between the exponential branch and the
    /// `divisor / amount` branch at `decay_start_amount`.
    pub fn boundary_gap(&self) -> f64 {
        let start = self.params.decay_start_amount;
        if start <= 0.0 {
            return 0.0;
        }
        (self.exponential_decay(start) - self.decay_rate(start)).abs()
    }

    /// Zero when there is no payment, a negative miner fee, or no positive
    /// fee rate signal. A NaN fee rate is an error.
    pub fn calculate(
        &self,
        ctx: &FeeCalculationContext<'_>,
    ) -> Result<BtcPaymentAmount, ValidationError> {
        let payment = ctx.payment_amount;
        let miner_fee = &ctx.network_fee.amount;
        let fee_rate = ctx.network_fee.fee_rate;

        if fee_rate.is_nan() {
            return Err(ValidationError::NonFiniteFee {
                stage: "network fee rate".to_string(),
            });
        }
        if !payment.is_positive() || miner_fee.is_negative() || fee_rate <= 0.0 {
            return Ok(BtcPaymentAmount::zero());
        }

        let satoshis = payment.clamp_to_u64().min(MAX_DECAY_INPUT_SATS);
        let miner_sats = miner_fee.clamp_to_u64().min(MAX_DECAY_INPUT_SATS);

        let dynamic_rate = self.dynamic_rate(satoshis as f64, fee_rate);
        let multiplier = self.base_multiplier(fee_rate);

        bank_fee(satoshis, dynamic_rate, miner_sats, multiplier)
    }
}

/// `ceil(satoshis * rate + miner_sats * multiplier)` in exact decimal.
fn bank_fee(
    satoshis: u64,
    rate: f64,
    miner_sats: u64,
    multiplier: f64,
) -> Result<BtcPaymentAmount, ValidationError> {
    let rate = to_decimal(rate, "dynamic fee rate")?;
    let multiplier = to_decimal(multiplier, "network fee multiplier")?;

    let out_of_range = || ValidationError::AmountOutOfRange {
        stage: "bank fee".to_string(),
    };
    let size_part = Decimal::from(satoshis)
        .checked_mul(rate)
        .ok_or_else(out_of_range)?;
    let network_part = Decimal::from(miner_sats)
        .checked_mul(multiplier)
        .ok_or_else(out_of_range)?;
    let fee = size_part
        .checked_add(network_part)
        .ok_or_else(out_of_range)?
        .ceil();

    // ceil maps (-1, 0] to zero; anything lower is a config or curve bug
    if fee < Decimal::ZERO {
        return Err(ValidationError::NegativeFee {
            fee: fee.to_string(),
        });
    }

    let sats = fee.to_i128().ok_or_else(out_of_range)?;
    Ok(BtcPaymentAmount::new(sats))
}

fn to_decimal(value: f64, stage: &str) -> Result<Decimal, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteFee {
            stage: stage.to_string(),
        });
    }
    Decimal::from_f64(value).ok_or_else(|| ValidationError::AmountOutOfRange {
        stage: stage.to_string(),
    })
}

//! Fee calculation types
//!
//! Strategy parameters, strategy specs, and the per-payment inputs the
//! strategies read. Parameters hold numbers as they appear in config
//! (IEEE doubles); integer constraints are enforced when a strategy is
//! built from them, not here.

use crate::account::{Account, AccountRole, Wallet};
use crate::errors::ValidationError;
use crate::ids::AccountId;
use crate::numeric::BtcPaymentAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network (miner or routing) fee for a payment
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkFee {
    pub amount: BtcPaymentAmount,
    /// sats/vbyte or an equivalent congestion signal; 0 when unknown
    pub fee_rate: f64,
}

impl NetworkFee {
    pub fn new(amount: BtcPaymentAmount, fee_rate: f64) -> Self {
        Self { amount, fee_rate }
    }

    /// Network fee without a fee rate signal
    pub fn flat(amount: BtcPaymentAmount) -> Self {
        Self {
            amount,
            fee_rate: 0.0,
        }
    }
}

/// Strategy tag as written in config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeStrategyType {
    Flat,
    Percentage,
    TieredFlat,
    Internal,
    Imbalance,
    ExponentialDecay,
}

impl FeeStrategyType {
    pub const ALL: [FeeStrategyType; 6] = [
        FeeStrategyType::Flat,
        FeeStrategyType::Percentage,
        FeeStrategyType::TieredFlat,
        FeeStrategyType::Internal,
        FeeStrategyType::Imbalance,
        FeeStrategyType::ExponentialDecay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeStrategyType::Flat => "flat",
            FeeStrategyType::Percentage => "percentage",
            FeeStrategyType::TieredFlat => "tieredFlat",
            FeeStrategyType::Internal => "internal",
            FeeStrategyType::Imbalance => "imbalance",
            FeeStrategyType::ExponentialDecay => "exponentialDecay",
        }
    }

    /// Look up a config tag; `None` for tags this build does not know
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for FeeStrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constant fee; negative values are discounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatFeeStrategyParams {
    pub amount: f64,
}

/// Fee proportional to the payment amount; may be negative or above 100%
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentageFeeStrategyParams {
    pub basis_points: f64,
}

/// One tier of a tiered flat fee. `max_amount: None` is the catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTier {
    pub max_amount: Option<f64>,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredFlatFeeStrategyParams {
    pub tiers: Vec<FeeTier>,
}

/// Accounts exempt from the fees accumulated before this strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalAccountFeeStrategyParams {
    #[serde(default)]
    pub roles: Vec<AccountRole>,
    #[serde(default)]
    pub account_ids: Vec<AccountId>,
}

/// Surcharge on payments that push a wallet's recent outflow past a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImbalanceFeeStrategyParams {
    pub threshold: f64,
    pub ratio_as_basis_points: f64,
    pub min_fee: f64,
    pub days_lookback: u32,
}

/// Size-decaying fee rate blended with the live network fee rate.
///
/// Field aliases accept the payout-queue config names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialDecayFeeStrategyParams {
    pub min_rate: f64,
    pub max_rate: f64,
    #[serde(alias = "threshold")]
    pub decay_start_amount: f64,
    #[serde(alias = "minAmount")]
    pub base_amount: f64,
    #[serde(alias = "exponentialFactor")]
    pub decay_speed: f64,
    #[serde(alias = "divisor")]
    pub terminal_divisor: f64,
    #[serde(alias = "targetRate")]
    pub target_fee_rate: f64,
    #[serde(alias = "minNetworkFee")]
    pub min_fee_rate: f64,
    #[serde(alias = "maxNetworkFee")]
    pub max_fee_rate: f64,
    #[serde(alias = "offset")]
    pub network_fee_offset: f64,
    #[serde(alias = "factor")]
    pub network_fee_factor: f64,
}

/// Parameters of one strategy, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum FeeStrategyParams {
    Flat(FlatFeeStrategyParams),
    Percentage(PercentageFeeStrategyParams),
    TieredFlat(TieredFlatFeeStrategyParams),
    Internal(InternalAccountFeeStrategyParams),
    Imbalance(ImbalanceFeeStrategyParams),
    ExponentialDecay(ExponentialDecayFeeStrategyParams),
}

impl FeeStrategyParams {
    pub fn strategy_type(&self) -> FeeStrategyType {
        match self {
            FeeStrategyParams::Flat(_) => FeeStrategyType::Flat,
            FeeStrategyParams::Percentage(_) => FeeStrategyType::Percentage,
            FeeStrategyParams::TieredFlat(_) => FeeStrategyType::TieredFlat,
            FeeStrategyParams::Internal(_) => FeeStrategyType::Internal,
            FeeStrategyParams::Imbalance(_) => FeeStrategyType::Imbalance,
            FeeStrategyParams::ExponentialDecay(_) => FeeStrategyType::ExponentialDecay,
        }
    }

    /// Decode the untyped `params` object of a known strategy type
    pub fn from_json(
        strategy_type: FeeStrategyType,
        params: serde_json::Value,
    ) -> Result<Self, ValidationError> {
        let invalid = |err: serde_json::Error| ValidationError::InvalidParams {
            strategy: strategy_type.to_string(),
            reason: err.to_string(),
        };

        let parsed = match strategy_type {
            FeeStrategyType::Flat => {
                FeeStrategyParams::Flat(serde_json::from_value(params).map_err(invalid)?)
            }
            FeeStrategyType::Percentage => {
                FeeStrategyParams::Percentage(serde_json::from_value(params).map_err(invalid)?)
            }
            FeeStrategyType::TieredFlat => {
                FeeStrategyParams::TieredFlat(serde_json::from_value(params).map_err(invalid)?)
            }
            FeeStrategyType::Internal => {
                FeeStrategyParams::Internal(serde_json::from_value(params).map_err(invalid)?)
            }
            FeeStrategyType::Imbalance => {
                FeeStrategyParams::Imbalance(serde_json::from_value(params).map_err(invalid)?)
            }
            FeeStrategyType::ExponentialDecay => FeeStrategyParams::ExponentialDecay(
                serde_json::from_value(params).map_err(invalid)?,
            ),
        };
        Ok(parsed)
    }
}

/// Named strategy entry of a fee policy
#[derive(Debug, Clone, PartialEq)]
pub struct FeeStrategySpec {
    pub name: String,
    pub params: FeeStrategyParams,
}

impl FeeStrategySpec {
    pub fn new(name: impl Into<String>, params: FeeStrategyParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn strategy_type(&self) -> FeeStrategyType {
        self.params.strategy_type()
    }
}

/// Strategy entry exactly as written in config: `{ name, strategy, params }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeeStrategySpec {
    pub name: String,
    pub strategy: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl RawFeeStrategySpec {
    /// Decode into a typed spec.
    ///
    /// Returns `Ok(None)` for a strategy tag this build does not know, so
    /// that config written for newer builds still loads.
    pub fn parse(&self) -> Result<Option<FeeStrategySpec>, ValidationError> {
        let Some(strategy_type) = FeeStrategyType::from_tag(&self.strategy) else {
            return Ok(None);
        };
        let params = FeeStrategyParams::from_json(strategy_type, self.params.clone())?;
        Ok(Some(FeeStrategySpec::new(self.name.clone(), params)))
    }
}

/// Per-payment inputs supplied by the payment pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct FeeRequest {
    pub payment_amount: BtcPaymentAmount,
    pub network_fee: NetworkFee,
    pub account: Account,
    pub wallet: Wallet,
    /// Recent wallet imbalance; `None` disables the imbalance surcharge
    pub imbalance: Option<BtcPaymentAmount>,
}

impl FeeRequest {
    pub fn new(
        payment_amount: BtcPaymentAmount,
        network_fee: NetworkFee,
        account: Account,
        wallet: Wallet,
    ) -> Self {
        Self {
            payment_amount,
            network_fee,
            account,
            wallet,
            imbalance: None,
        }
    }

    pub fn with_imbalance(mut self, imbalance: BtcPaymentAmount) -> Self {
        self.imbalance = Some(imbalance);
        self
    }

    /// View of this request as seen by one strategy in a composite chain
    pub fn context<'a>(&'a self, previous_fee: &'a BtcPaymentAmount) -> FeeCalculationContext<'a> {
        FeeCalculationContext {
            payment_amount: &self.payment_amount,
            network_fee: &self.network_fee,
            account: &self.account,
            wallet: &self.wallet,
            previous_fee,
            imbalance: self.imbalance.as_ref(),
        }
    }
}

/// Everything a strategy may read for one calculation
#[derive(Debug, Clone, Copy)]
pub struct FeeCalculationContext<'a> {
    pub payment_amount: &'a BtcPaymentAmount,
    pub network_fee: &'a NetworkFee,
    pub account: &'a Account,
    pub wallet: &'a Wallet,
    /// Running total of the composite chain before this strategy
    pub previous_fee: &'a BtcPaymentAmount,
    pub imbalance: Option<&'a BtcPaymentAmount>,
}

/// Composite fee split into its network and bank parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub miner_fee: BtcPaymentAmount,
    pub bank_fee: BtcPaymentAmount,
    pub total_fee: BtcPaymentAmount,
}

impl FeeBreakdown {
    pub fn new(miner_fee: BtcPaymentAmount, total_fee: BtcPaymentAmount) -> Self {
        let bank_fee = &total_fee - &miner_fee;
        Self {
            miner_fee,
            bank_fee,
            total_fee,
        }
    }
}

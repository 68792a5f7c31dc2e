//! Composite fee calculator
//!
//! Folds an ordered strategy chain over a running total that starts at the
//! network fee:
//!
//! 1. `total = network_fee.amount`
//! 2. for each strategy in order: `total += strategy(ctx with previous_fee = total)`
//! 3. `max(max(total, network_fee.amount), 0)`
//!
//! The first strategy error aborts the calculation; no partial fee is
//! returned. Order matters: discounts only cancel what ran before them.
//!
//! Every strategy entry is validated when the calculator is built, before any
//! strategy runs. A chain holding both invalid params and a strategy that
//! fails at calculation time reports the params error, even when the
//! failing strategy comes first. Either way the caller gets an error.

use tracing::{debug, info, warn};
use types::errors::ValidationError;
use types::fee::{FeeBreakdown, FeeRequest, FeeStrategySpec, RawFeeStrategySpec};
use types::numeric::BtcPaymentAmount;

use crate::strategy::FeeStrategy;

/// Validate `specs` and compute the composite fee for one request.
///
/// Callers evaluating many payments against the same policy should build a
/// `CompositeFeeCalculator` once instead.
pub fn calculate_composite_fee(
    request: &FeeRequest,
    specs: &[FeeStrategySpec],
) -> Result<BtcPaymentAmount, ValidationError> {
    CompositeFeeCalculator::new(specs)?.calculate(request)
}

#[derive(Debug, Clone, PartialEq)]
struct NamedStrategy {
    name: String,
    strategy: FeeStrategy,
}

/// Pre-validated strategy chain. Immutable and shareable across threads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeFeeCalculator {
    strategies: Vec<NamedStrategy>,
}

impl CompositeFeeCalculator {
    /// Build from typed specs, failing on the first invalid one
    pub fn new(specs: &[FeeStrategySpec]) -> Result<Self, ValidationError> {
        let strategies = specs
            .iter()
            .map(|spec| -> Result<NamedStrategy, ValidationError> {
                Ok(NamedStrategy {
                    name: spec.name.clone(),
                    strategy: FeeStrategy::from_params(&spec.params)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let calculator = Self { strategies };
        info!(
            strategy_count = calculator.len(),
            strategies = ?calculator.names(),
            "CompositeFeeCalculator initialized"
        );
        Ok(calculator)
    }

    /// Build from config entries.
    ///
    /// Entries with a strategy tag this build does not know contribute
    /// nothing and are dropped with a warning. A known tag with bad params
    /// is an error.
    pub fn from_raw(raw_specs: &[RawFeeStrategySpec]) -> Result<Self, ValidationError> {
        let mut specs = Vec::with_capacity(raw_specs.len());
        for raw in raw_specs {
            match raw.parse()? {
                Some(spec) => specs.push(spec),
                None => {
                    warn!(
                        name = %raw.name,
                        strategy = %raw.strategy,
                        "Skipping unknown fee strategy"
                    );
                }
            }
        }
        Self::new(&specs)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in evaluation order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total fee for `request`, never below the network fee nor zero
    pub fn calculate(&self, request: &FeeRequest) -> Result<BtcPaymentAmount, ValidationError> {
        let network_fee = &request.network_fee.amount;
        let mut total_fee = network_fee.clone();

        for named in &self.strategies {
            let current_fee = named.strategy.calculate(&request.context(&total_fee))?;
            total_fee = &total_fee + &current_fee;

            debug!(
                name = %named.name,
                strategy = %named.strategy.strategy_type(),
                fee = %current_fee,
                total_fee = %total_fee,
                "Applied fee strategy"
            );
        }

        let clamped = total_fee
            .clone()
            .max(network_fee.clone())
            .max(BtcPaymentAmount::zero());
        if clamped != total_fee {
            debug!(
                total_fee = %total_fee,
                clamped = %clamped,
                "Composite fee clamped to network fee floor"
            );
        }
        Ok(clamped)
    }

    /// Same as `calculate`, split into miner and bank parts
    pub fn calculate_breakdown(&self, request: &FeeRequest) -> Result<FeeBreakdown, ValidationError> {
        let total_fee = self.calculate(request)?;
        Ok(FeeBreakdown::new(request.network_fee.amount.clone(), total_fee))
    }
}

//! Fee Engine
//!
//! Computes the bank fee charged on outgoing Bitcoin/Lightning payments:
//! - Six strategy kinds (flat, percentage, tiered flat, internal account
//!   discount, imbalance surcharge, exponential decay)
//! - Construction-time validation of strategy parameters
//! - Composite calculation over an ordered strategy chain, floored at the
//!   network fee
//! - JSON fee policy loading (withdrawals and payout queues)
//!
//! Every calculation is pure and synchronous. Validated strategies and
//! calculators are immutable and can be shared across threads.

pub mod validator;
pub mod flat;
pub mod percentage;
pub mod tiered;
pub mod internal;
pub mod imbalance;
pub mod exponential_decay;
pub mod strategy;
pub mod composite;
pub mod config;

pub use composite::{calculate_composite_fee, CompositeFeeCalculator};
pub use config::{FeeConfig, PayoutQueueFeeConfig, PayoutSpeed};
pub use strategy::FeeStrategy;

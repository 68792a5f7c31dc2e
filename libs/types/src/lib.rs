//! Types library for the bank fee engine
//!
//! This library provides the core type definitions shared by the fee engine
//! and its callers: currency-tagged amounts, account and wallet views, fee
//! strategy parameters, and the error taxonomy.
//!
//! # Modules
//! - `ids`: Identifiers (AccountId, WalletId)
//! - `numeric`: Arbitrary-precision currency-tagged amounts (PaymentAmount)
//! - `account`: Account and wallet views
//! - `fee`: Network fee, strategy params/specs, calculation context
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod account;
pub mod fee;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::account::*;
    pub use crate::fee::*;
    pub use crate::errors::*;
}

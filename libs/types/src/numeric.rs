//! Currency-tagged payment amounts
//!
//! Amounts are arbitrary-precision integers in the currency's smallest unit
//! (satoshis for BTC, cents for USD). The currency is part of the type, so
//! adding a USD amount to a BTC amount does not compile.
//!
//! Basis-point multiplication rounds half away from zero:
//! `5 sats * 1000bp = 0.5 -> 1`, `-5 sats * 1000bp = -0.5 -> -1`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// 10000 bp = 100%
pub const BASIS_POINTS_SCALE: i64 = 10_000;

/// Largest integer a config number (IEEE double) can carry exactly: 2^53 - 1.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Runtime currency tag, as stored on wallets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletCurrency {
    Btc,
    Usd,
}

impl fmt::Display for WalletCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletCurrency::Btc => write!(f, "BTC"),
            WalletCurrency::Usd => write!(f, "USD"),
        }
    }
}

/// Type-level currency marker
pub trait Currency: Copy + fmt::Debug + Send + Sync + 'static {
    const CODE: WalletCurrency;
}

/// Bitcoin, denominated in satoshis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Btc;

/// US dollar, denominated in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Usd;

impl Currency for Btc {
    const CODE: WalletCurrency = WalletCurrency::Btc;
}

impl Currency for Usd {
    const CODE: WalletCurrency = WalletCurrency::Usd;
}

/// Signed integer amount tagged with a currency.
///
/// Negative values are legal as intermediate strategy outputs (discounts).
pub struct PaymentAmount<C: Currency> {
    amount: BigInt,
    currency: PhantomData<C>,
}

pub type BtcPaymentAmount = PaymentAmount<Btc>;
pub type UsdPaymentAmount = PaymentAmount<Usd>;

impl<C: Currency> PaymentAmount<C> {
    /// Create from any integer
    pub fn new(amount: impl Into<BigInt>) -> Self {
        Self {
            amount: amount.into(),
            currency: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero())
    }

    /// Convert a configured number into an amount.
    ///
    /// Fails if the number is fractional, non-finite, or beyond
    /// `MAX_SAFE_INTEGER`. `field` names the config key in the error.
    pub fn from_number(value: f64, field: &str) -> Result<Self, ValidationError> {
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
        // Exact: |value| <= 2^53 - 1 fits in i64
        Ok(Self::new(value as i64))
    }

    pub fn amount(&self) -> &BigInt {
        &self.amount
    }

    pub fn currency(&self) -> WalletCurrency {
        C::CODE
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    /// Amount as u64, clamped into `0..=u64::MAX`
    pub fn clamp_to_u64(&self) -> u64 {
        if self.is_negative() {
            return 0;
        }
        self.amount.to_u64().unwrap_or(u64::MAX)
    }

    /// `amount * basis_points / 10000`, rounded half away from zero
    pub fn mul_basis_points(&self, basis_points: i64) -> Self {
        let product = &self.amount * BigInt::from(basis_points);
        Self::new(div_round_half_away(&product, &BigInt::from(BASIS_POINTS_SCALE)))
    }

    /// Smaller of two amounts of the same currency
    pub fn min(self, other: Self) -> Self {
        std::cmp::min(self, other)
    }

    /// Larger of two amounts of the same currency
    pub fn max(self, other: Self) -> Self {
        std::cmp::max(self, other)
    }
}

/// Integer division rounding half away from zero. `d` must be positive.
fn div_round_half_away(n: &BigInt, d: &BigInt) -> BigInt {
    let quotient = n / d;
    let remainder = n % d;
    if remainder.magnitude() * 2u32 >= *d.magnitude() {
        quotient + n.signum()
    } else {
        quotient
    }
}

// Manual impls: derives would demand `C: Trait` for a marker that is never stored.

impl<C: Currency> Clone for PaymentAmount<C> {
    fn clone(&self) -> Self {
        Self::new(self.amount.clone())
    }
}

impl<C: Currency> fmt::Debug for PaymentAmount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentAmount")
            .field("amount", &self.amount)
            .field("currency", &C::CODE)
            .finish()
    }
}

impl<C: Currency> fmt::Display for PaymentAmount<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, C::CODE)
    }
}

impl<C: Currency> PartialEq for PaymentAmount<C> {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
    }
}

impl<C: Currency> Eq for PaymentAmount<C> {}

impl<C: Currency> PartialOrd for PaymentAmount<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Currency> Ord for PaymentAmount<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount.cmp(&other.amount)
    }
}

impl<C: Currency> Hash for PaymentAmount<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.amount.hash(state);
        C::CODE.hash(state);
    }
}

impl<C: Currency> Default for PaymentAmount<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: Currency> Add for PaymentAmount<C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount + rhs.amount)
    }
}

impl<'a, C: Currency> Add<&'a PaymentAmount<C>> for &'a PaymentAmount<C> {
    type Output = PaymentAmount<C>;

    fn add(self, rhs: Self) -> PaymentAmount<C> {
        PaymentAmount::new(&self.amount + &rhs.amount)
    }
}

impl<C: Currency> Sub for PaymentAmount<C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.amount - rhs.amount)
    }
}

impl<'a, C: Currency> Sub<&'a PaymentAmount<C>> for &'a PaymentAmount<C> {
    type Output = PaymentAmount<C>;

    fn sub(self, rhs: Self) -> PaymentAmount<C> {
        PaymentAmount::new(&self.amount - &rhs.amount)
    }
}

impl<C: Currency> Neg for PaymentAmount<C> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount)
    }
}

impl<C: Currency> Neg for &PaymentAmount<C> {
    type Output = PaymentAmount<C>;

    fn neg(self) -> PaymentAmount<C> {
        PaymentAmount::new(-&self.amount)
    }
}

impl<C: Currency> Mul<i64> for &PaymentAmount<C> {
    type Output = PaymentAmount<C>;

    fn mul(self, scalar: i64) -> PaymentAmount<C> {
        PaymentAmount::new(&self.amount * BigInt::from(scalar))
    }
}

impl<C: Currency> Mul<i64> for PaymentAmount<C> {
    type Output = Self;

    fn mul(self, scalar: i64) -> Self {
        &self * scalar
    }
}

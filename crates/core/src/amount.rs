//! StakeAmount - Unsigned wei quantity for staking operations
//!
//! All stake amounts in SoloVault are exact unsigned integers (wei).
//! Arithmetic goes through checked operations; overflow is surfaced,
//! never wrapped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An unsigned stake quantity in wei.
///
/// # Invariant
/// Ledger balances built from this type are always whole multiples of the
/// configured unit deposit size; `is_multiple_of` is the check every
/// mutating operation runs before committing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StakeAmount(u128);

impl StakeAmount {
    /// Zero amount constant
    pub const ZERO: Self = Self(0);

    /// Create a new StakeAmount from a raw wei value
    #[inline]
    pub const fn new(wei: u128) -> Self {
        Self(wei)
    }

    /// Get the inner wei value
    #[inline]
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whether this amount is a whole multiple of `unit`.
    ///
    /// A zero unit divides nothing but zero.
    pub const fn is_multiple_of(&self, unit: StakeAmount) -> bool {
        if unit.0 == 0 {
            return self.0 == 0;
        }
        self.0 % unit.0 == 0
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: StakeAmount) -> Option<StakeAmount> {
        self.0.checked_add(other.0).map(StakeAmount)
    }

    /// Checked subtraction - returns None if the result would underflow
    pub fn checked_sub(&self, other: StakeAmount) -> Option<StakeAmount> {
        self.0.checked_sub(other.0).map(StakeAmount)
    }

    /// Checked multiplication by a count - returns None on overflow
    pub fn checked_mul(&self, count: u64) -> Option<StakeAmount> {
        self.0.checked_mul(u128::from(count)).map(StakeAmount)
    }

    /// Saturating addition, for read-only aggregation
    pub fn saturating_add(&self, other: StakeAmount) -> StakeAmount {
        StakeAmount(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for StakeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for StakeAmount {
    fn from(wei: u128) -> Self {
        Self(wei)
    }
}

impl From<StakeAmount> for u128 {
    fn from(amount: StakeAmount) -> Self {
        amount.0
    }
}

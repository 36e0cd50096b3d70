//! Solo entry - per-depositor accounting record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solovault_core::{StakeAmount, WithdrawalCredentials};

/// A single ledger entry: pending stake, withdrawal destination, and lock
/// expiry for one (depositor, credentials) pair.
///
/// # Invariants
/// - `balance` is always a whole multiple of the unit deposit size.
/// - `withdrawal_credentials` is fixed by the first deposit and never
///   changes; the entry's identity is derived from it.
/// - `release_time` is `now + lock duration` as of the most recent deposit
///   or cancellation that touched the entry. Activation leaves it alone.
/// - A cancellation that empties the balance removes the entry. A batch
///   activation that empties it does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solo {
    /// Pending stake not yet consumed by activation
    pub balance: StakeAmount,

    /// Opaque withdrawal destination, immutable for the entry's lifetime
    pub withdrawal_credentials: WithdrawalCredentials,

    /// Instant before which the balance cannot be withdrawn
    pub release_time: DateTime<Utc>,
}

impl Solo {
    /// Whether the lock has fully elapsed as of `now`
    pub fn is_withdrawable(&self, now: DateTime<Utc>) -> bool {
        now >= self.release_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_withdrawable_at_exact_expiry() {
        let release = DateTime::UNIX_EPOCH + Duration::days(7);
        let solo = Solo {
            balance: StakeAmount::new(32),
            withdrawal_credentials: WithdrawalCredentials::bls([0x01; 31]),
            release_time: release,
        };

        assert!(!solo.is_withdrawable(release - Duration::seconds(1)));
        assert!(solo.is_withdrawable(release));
        assert!(solo.is_withdrawable(release + Duration::seconds(1)));
    }
}

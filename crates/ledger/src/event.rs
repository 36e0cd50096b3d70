//! Ledger events - the audit trail of deposit intake and cancellation
//!
//! These events are the sole audit trail the core keeps. Batch activation
//! emits nothing of its own; the registration authority and validator
//! registry own that record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solovault_core::{Address, DepositId, StakeAmount, WithdrawalCredentials};

/// An audit event emitted by the deposit ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A deposit was credited to an entry
    DepositAdded {
        deposit_id: DepositId,
        depositor: Address,
        amount: StakeAmount,
        withdrawal_credentials: WithdrawalCredentials,
        at: DateTime<Utc>,
    },

    /// Pending stake was canceled and refunded
    DepositCanceled {
        deposit_id: DepositId,
        amount: StakeAmount,
        at: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// The identity of the entry the event touched
    pub fn deposit_id(&self) -> DepositId {
        match self {
            LedgerEvent::DepositAdded { deposit_id, .. }
            | LedgerEvent::DepositCanceled { deposit_id, .. } => *deposit_id,
        }
    }

    /// When the event was emitted
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::DepositAdded { at, .. } | LedgerEvent::DepositCanceled { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_roundtrip() {
        let event = LedgerEvent::DepositCanceled {
            deposit_id: DepositId::derive(
                &Address::new([1; 20]),
                &Address::new([2; 20]),
                &WithdrawalCredentials::bls([0x01; 31]),
            ),
            amount: StakeAmount::new(32),
            at: DateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"deposit_canceled\""));

        let parsed: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}

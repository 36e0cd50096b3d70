//! Ledger errors
//!
//! Every violation aborts the enclosing operation with no partial state
//! change. There is no retry, no degraded mode, and no silent clamping:
//! each variant names the precondition that failed.

use chrono::{DateTime, Utc};
use solovault_core::{Address, CredentialsError, DepositId, StakeAmount};
use thiserror::Error;

/// Which part of the contract a failure violates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Configured policy: pause flag, ceiling, unit multiples, credential marker
    Policy,
    /// Caller is not authorized for the operation
    Permission,
    /// Ledger state forbids the operation: lock, balance, remainder
    State,
    /// An external collaborator rejected a call
    Collaborator,
}

/// A rejected call to an external collaborator, propagated unswallowed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{collaborator} rejected the call: {reason}")]
pub struct CollaboratorError {
    pub collaborator: &'static str,
    pub reason: String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, reason: impl Into<String>) -> Self {
        Self {
            collaborator,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur in deposit ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Deposits are paused")]
    Paused,

    #[error("Deposit of {payment} exceeds the ceiling {ceiling}")]
    AboveCeiling {
        payment: StakeAmount,
        ceiling: StakeAmount,
    },

    #[error("Deposit amount must be strictly positive")]
    ZeroDeposit,

    #[error("Amount {amount} is not a multiple of the unit deposit size {unit}")]
    NotUnitMultiple {
        amount: StakeAmount,
        unit: StakeAmount,
    },

    #[error("{0} is not a recognized operator")]
    NotOperator(Address),

    #[error("No deposit found for identity {0}")]
    UnknownDeposit(DepositId),

    #[error("Withdrawal locked until {release_time}, now is {now}")]
    LockNotExpired {
        release_time: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("Insufficient balance on {deposit_id}: requested {requested}, available {available}")]
    InsufficientBalance {
        deposit_id: DepositId,
        requested: StakeAmount,
        available: StakeAmount,
    },

    #[error("Remaining balance {remaining} would not be a multiple of the unit deposit size {unit}")]
    RemainderNotUnitMultiple {
        remaining: StakeAmount,
        unit: StakeAmount,
    },

    #[error("Balance arithmetic overflow")]
    BalanceOverflow,

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl LedgerError {
    /// Categorize the failure for callers that branch on the violation
    /// class rather than the specific precondition.
    pub fn kind(&self) -> ViolationKind {
        match self {
            LedgerError::Paused
            | LedgerError::AboveCeiling { .. }
            | LedgerError::ZeroDeposit
            | LedgerError::NotUnitMultiple { .. }
            | LedgerError::Credentials(_) => ViolationKind::Policy,

            LedgerError::NotOperator(_) => ViolationKind::Permission,

            LedgerError::UnknownDeposit(_)
            | LedgerError::LockNotExpired { .. }
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::RemainderNotUnitMultiple { .. }
            | LedgerError::BalanceOverflow => ViolationKind::State,

            LedgerError::Collaborator(_) => ViolationKind::Collaborator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind() {
        assert_eq!(LedgerError::Paused.kind(), ViolationKind::Policy);
        assert_eq!(LedgerError::ZeroDeposit.kind(), ViolationKind::Policy);
    }

    #[test]
    fn test_permission_kind() {
        let err = LedgerError::NotOperator(Address::new([0; 20]));
        assert_eq!(err.kind(), ViolationKind::Permission);
    }

    #[test]
    fn test_state_kind() {
        let err = LedgerError::RemainderNotUnitMultiple {
            remaining: StakeAmount::new(16),
            unit: StakeAmount::new(32),
        };
        assert_eq!(err.kind(), ViolationKind::State);
    }

    #[test]
    fn test_collaborator_kind() {
        let err: LedgerError = CollaboratorError::new("registration authority", "bad proof").into();
        assert_eq!(err.kind(), ViolationKind::Collaborator);
    }
}

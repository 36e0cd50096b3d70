//! Collaborator interfaces - external authorities injected at construction
//!
//! The ledger consumes four external surfaces. All are injected once as
//! `Arc<dyn Trait>` handles and treated as immutable dependencies. The
//! traits are synchronous: the core is strictly serialized, one
//! state-mutating call in flight at a time.

use chrono::Duration;
use solovault_core::{
    Address, BlsSignature, DepositDataRoot, DepositId, StakeAmount, ValidatorPublicKey,
    WithdrawalCredentials,
};
use std::collections::HashSet;

use crate::error::CollaboratorError;

/// Global settings registry supplying economic parameters. Read-only.
pub trait ParameterProvider: Send + Sync {
    /// Whether deposit intake into the given ledger is suspended
    fn is_paused(&self, ledger: Address) -> bool;

    /// Maximum single-deposit payment
    fn max_deposit_amount(&self) -> StakeAmount;

    /// Fixed stake amount required to activate one validator
    fn unit_deposit_amount(&self) -> StakeAmount;

    /// Minimum time a deposit stays locked after the touch that set it
    fn withdrawal_lock_duration(&self) -> Duration;
}

/// Permission registry answering "is this caller a trusted operator"
pub trait AccessAuthority: Send + Sync {
    fn is_operator(&self, caller: Address) -> bool;
}

/// The external validator-registration authority.
///
/// `activate` is the irreversible commitment point: it must not be called
/// twice for the same public key and is expected to reject malformed
/// proofs. It carries exactly one unit of stake.
pub trait RegistrationAuthority: Send + Sync {
    fn activate(
        &self,
        public_key: &ValidatorPublicKey,
        withdrawal_credentials: &WithdrawalCredentials,
        signature: &BlsSignature,
        deposit_data_root: &DepositDataRoot,
        stake: StakeAmount,
    ) -> Result<(), CollaboratorError>;
}

/// Records which deposit identity an activated validator's stake came
/// from. A back-reference for downstream accounting, not ownership.
pub trait ValidatorRegistry: Send + Sync {
    fn record(
        &self,
        public_key: &ValidatorPublicKey,
        origin: DepositId,
    ) -> Result<(), CollaboratorError>;
}

/// Fixed economic parameters, set once
#[derive(Debug, Clone)]
pub struct StaticParameters {
    pub paused: bool,
    pub max_deposit: StakeAmount,
    pub unit_deposit: StakeAmount,
    pub lock_duration: Duration,
}

impl StaticParameters {
    pub fn new(unit_deposit: StakeAmount, max_deposit: StakeAmount, lock_duration: Duration) -> Self {
        Self {
            paused: false,
            max_deposit,
            unit_deposit,
            lock_duration,
        }
    }

    /// Same parameters with intake suspended
    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }
}

impl ParameterProvider for StaticParameters {
    fn is_paused(&self, _ledger: Address) -> bool {
        self.paused
    }

    fn max_deposit_amount(&self) -> StakeAmount {
        self.max_deposit
    }

    fn unit_deposit_amount(&self) -> StakeAmount {
        self.unit_deposit
    }

    fn withdrawal_lock_duration(&self) -> Duration {
        self.lock_duration
    }
}

/// Allowlist of trusted operator addresses
#[derive(Debug, Clone, Default)]
pub struct OperatorSet {
    operators: HashSet<Address>,
}

impl OperatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant operator status to an address
    pub fn grant(&mut self, operator: Address) {
        self.operators.insert(operator);
    }

    /// Revoke operator status from an address
    pub fn revoke(&mut self, operator: Address) {
        self.operators.remove(&operator);
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl FromIterator<Address> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            operators: iter.into_iter().collect(),
        }
    }
}

impl AccessAuthority for OperatorSet {
    fn is_operator(&self, caller: Address) -> bool {
        self.operators.contains(&caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    #[test]
    fn test_operator_grant_revoke() {
        let mut ops = OperatorSet::new();
        assert!(!ops.is_operator(addr(1)));

        ops.grant(addr(1));
        assert!(ops.is_operator(addr(1)));
        assert!(!ops.is_operator(addr(2)));

        ops.revoke(addr(1));
        assert!(!ops.is_operator(addr(1)));
        assert!(ops.is_empty());
    }

    #[test]
    fn test_operator_set_from_iter() {
        let ops: OperatorSet = [addr(1), addr(2)].into_iter().collect();
        assert_eq!(ops.len(), 2);
        assert!(ops.is_operator(addr(2)));
    }

    #[test]
    fn test_static_parameters_paused() {
        let params = StaticParameters::new(
            StakeAmount::new(32),
            StakeAmount::new(320),
            Duration::days(1),
        );
        assert!(!params.is_paused(addr(9)));
        assert!(params.paused().is_paused(addr(9)));
    }
}

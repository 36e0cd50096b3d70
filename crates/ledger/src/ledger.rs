//! SoloDepositLedger - deposit intake, cancellation, and batch activation
//!
//! Every operation validates all preconditions first and only then
//! mutates, so a failed call leaves no trace. Ledger state is always
//! finalized before anything leaves the ledger: the cancellation refund is
//! produced after the entry update, and batch activation commits its
//! debits before the first collaborator call.

use std::collections::HashMap;
use std::sync::Arc;

use solovault_core::{
    Address, BlsSignature, Clock, DepositDataRoot, DepositId, StakeAmount, ValidatorPublicKey,
    WithdrawalCredentials,
};

use crate::entry::Solo;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::traits::{AccessAuthority, ParameterProvider, RegistrationAuthority, ValidatorRegistry};

/// One validator activation within a batch
#[derive(Debug, Clone)]
pub struct ActivationRequest {
    /// Entry to debit one unit deposit from
    pub deposit_id: DepositId,
    /// The validator's BLS public key
    pub public_key: ValidatorPublicKey,
    /// Signature over the deposit data, forwarded opaquely
    pub signature: BlsSignature,
    /// Integrity root committing to the deposit data, forwarded opaquely
    pub deposit_data_root: DepositDataRoot,
}

/// Pooled custody ledger for solo validator deposits.
///
/// Maps each derived deposit identity to its `Solo` entry and tracks the
/// native stake held against those entries. Collaborator handles are set
/// once at construction and immutable thereafter.
///
/// # Conservation
/// At every quiescent point, `held()` equals the sum of all live entry
/// balances (`is_balanced()`): intake credits both, cancellation and
/// activation debit both.
pub struct SoloDepositLedger {
    /// This ledger's own identity, an input to deposit-id derivation
    address: Address,
    params: Arc<dyn ParameterProvider>,
    access: Arc<dyn AccessAuthority>,
    registration: Arc<dyn RegistrationAuthority>,
    validators: Arc<dyn ValidatorRegistry>,
    clock: Arc<dyn Clock>,
    solos: HashMap<DepositId, Solo>,
    /// Native stake held by the ledger against live entries
    held: StakeAmount,
    events: Vec<LedgerEvent>,
}

impl SoloDepositLedger {
    /// Create an empty ledger with its collaborators wired in
    pub fn new(
        address: Address,
        params: Arc<dyn ParameterProvider>,
        access: Arc<dyn AccessAuthority>,
        registration: Arc<dyn RegistrationAuthority>,
        validators: Arc<dyn ValidatorRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            address,
            params,
            access,
            registration,
            validators,
            clock,
            solos: HashMap::new(),
            held: StakeAmount::ZERO,
            events: Vec::new(),
        }
    }

    /// Credit a payment to the entry keyed by (this ledger, depositor,
    /// credentials), creating the entry on first deposit.
    ///
    /// The payment must be positive, at most the configured ceiling, and an
    /// exact multiple of the unit deposit size. A repeat deposit resets the
    /// entry's release time to `now + lock duration`; it never alters the
    /// stored credentials.
    pub fn deposit(
        &mut self,
        depositor: Address,
        credentials: WithdrawalCredentials,
        payment: StakeAmount,
    ) -> Result<DepositId, LedgerError> {
        if self.params.is_paused(self.address) {
            return Err(LedgerError::Paused);
        }
        let ceiling = self.params.max_deposit_amount();
        if payment > ceiling {
            return Err(LedgerError::AboveCeiling { payment, ceiling });
        }
        if payment.is_zero() {
            return Err(LedgerError::ZeroDeposit);
        }
        let unit = self.params.unit_deposit_amount();
        if !payment.is_multiple_of(unit) {
            return Err(LedgerError::NotUnitMultiple {
                amount: payment,
                unit,
            });
        }

        let deposit_id = DepositId::derive(&self.address, &depositor, &credentials);

        // Validate both additions before touching anything, so an overflow
        // cannot leave a half-applied deposit.
        let current = self
            .solos
            .get(&deposit_id)
            .map(|solo| solo.balance)
            .unwrap_or(StakeAmount::ZERO);
        let new_balance = current
            .checked_add(payment)
            .ok_or(LedgerError::BalanceOverflow)?;
        let new_held = self
            .held
            .checked_add(payment)
            .ok_or(LedgerError::BalanceOverflow)?;

        let now = self.clock.now();
        let release_time = now + self.params.withdrawal_lock_duration();

        let solo = self.solos.entry(deposit_id).or_insert(Solo {
            balance: StakeAmount::ZERO,
            withdrawal_credentials: credentials,
            release_time,
        });
        solo.balance = new_balance;
        // Overwrite, not extend: each deposit restarts the caller's own lock.
        solo.release_time = release_time;
        self.held = new_held;

        self.events.push(LedgerEvent::DepositAdded {
            deposit_id,
            depositor,
            amount: payment,
            withdrawal_credentials: solo.withdrawal_credentials,
            at: now,
        });

        tracing::debug!(
            deposit_id = %deposit_id,
            depositor = %depositor,
            amount = %payment,
            "Deposit added"
        );

        Ok(deposit_id)
    }

    /// Cancel `amount` of pending stake and refund it to the caller.
    ///
    /// The lock must have fully elapsed, the amount must not exceed the
    /// balance, and the remaining balance must stay an exact unit multiple.
    /// An emptied entry is removed; a partially canceled entry has its
    /// release time reset to `now + lock duration`.
    ///
    /// The refund is the return value, produced only after the ledger state
    /// is final (update before pay).
    pub fn cancel(
        &mut self,
        depositor: Address,
        credentials: &WithdrawalCredentials,
        amount: StakeAmount,
    ) -> Result<StakeAmount, LedgerError> {
        let deposit_id = DepositId::derive(&self.address, &depositor, credentials);
        let now = self.clock.now();

        let solo = self
            .solos
            .get(&deposit_id)
            .ok_or(LedgerError::UnknownDeposit(deposit_id))?;
        if now < solo.release_time {
            return Err(LedgerError::LockNotExpired {
                release_time: solo.release_time,
                now,
            });
        }
        if amount > solo.balance {
            return Err(LedgerError::InsufficientBalance {
                deposit_id,
                requested: amount,
                available: solo.balance,
            });
        }
        let remaining = solo
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        let unit = self.params.unit_deposit_amount();
        if !remaining.is_multiple_of(unit) {
            return Err(LedgerError::RemainderNotUnitMultiple { remaining, unit });
        }
        let new_held = self
            .held
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceOverflow)?;

        if remaining.is_zero() {
            self.solos.remove(&deposit_id);
        } else if let Some(solo) = self.solos.get_mut(&deposit_id) {
            solo.balance = remaining;
            solo.release_time = now + self.params.withdrawal_lock_duration();
        }
        self.held = new_held;

        self.events.push(LedgerEvent::DepositCanceled {
            deposit_id,
            amount,
            at: now,
        });

        tracing::debug!(
            deposit_id = %deposit_id,
            amount = %amount,
            remaining = %remaining,
            "Deposit canceled"
        );

        Ok(amount)
    }

    /// Activate one validator per request, all-or-nothing across the list.
    ///
    /// Only a recognized operator may call this. Requests are processed in
    /// list order; the same identity may appear more than once and each
    /// occurrence debits another unit. Debits are staged against a working
    /// copy first, so a failed debit anywhere means no entry was touched
    /// and no collaborator call was issued. Once every debit holds, the
    /// copy commits and the collaborators run per request: validator
    /// registry record, then registration authority activation carrying one
    /// unit of stake and the entry's immutable credentials.
    ///
    /// A collaborator failure restores the pre-batch ledger in full and
    /// propagates the error. Entries debited to zero are retained;
    /// activation never deletes, only cancellation does.
    pub fn activate_batch(
        &mut self,
        caller: Address,
        requests: &[ActivationRequest],
    ) -> Result<(), LedgerError> {
        if !self.access.is_operator(caller) {
            return Err(LedgerError::NotOperator(caller));
        }
        if requests.is_empty() {
            return Ok(());
        }
        let unit = self.params.unit_deposit_amount();

        // Stage every debit on a working copy, in list order. Later
        // requests may legitimately hit an entry debited earlier in the
        // same batch.
        let mut staged = self.solos.clone();
        for request in requests {
            let solo = staged
                .get_mut(&request.deposit_id)
                .ok_or(LedgerError::UnknownDeposit(request.deposit_id))?;
            solo.balance =
                solo.balance
                    .checked_sub(unit)
                    .ok_or(LedgerError::InsufficientBalance {
                        deposit_id: request.deposit_id,
                        requested: unit,
                        available: solo.balance,
                    })?;
        }
        let total = unit
            .checked_mul(requests.len() as u64)
            .ok_or(LedgerError::BalanceOverflow)?;
        let staged_held = self
            .held
            .checked_sub(total)
            .ok_or(LedgerError::BalanceOverflow)?;

        // Commit the debits before the first external call (update before
        // external effect). The replaced state is the rollback point.
        let rollback_solos = std::mem::replace(&mut self.solos, staged);
        let rollback_held = std::mem::replace(&mut self.held, staged_held);

        for request in requests {
            if let Err(err) = self.dispatch_activation(request, unit) {
                // Full local rollback. Calls already issued to earlier
                // requests are irreversible on the collaborator side; the
                // error carries which request failed.
                self.solos = rollback_solos;
                self.held = rollback_held;
                tracing::warn!(
                    deposit_id = %request.deposit_id,
                    public_key = %request.public_key,
                    error = %err,
                    "Batch activation aborted"
                );
                return Err(err);
            }
        }

        tracing::debug!(count = requests.len(), "Batch activation complete");
        Ok(())
    }

    /// Record the validator association, then hand one unit of stake and
    /// the activation material to the registration authority.
    fn dispatch_activation(
        &self,
        request: &ActivationRequest,
        unit: StakeAmount,
    ) -> Result<(), LedgerError> {
        // The entry survives a debit to zero, so the credentials lookup
        // cannot miss for a request that passed staging.
        let solo = self
            .solos
            .get(&request.deposit_id)
            .ok_or(LedgerError::UnknownDeposit(request.deposit_id))?;

        self.validators
            .record(&request.public_key, request.deposit_id)?;
        self.registration.activate(
            &request.public_key,
            &solo.withdrawal_credentials,
            &request.signature,
            &request.deposit_data_root,
            unit,
        )?;
        Ok(())
    }

    /// This ledger's own identity
    pub fn address(&self) -> Address {
        self.address
    }

    /// The identity a deposit from `depositor` under `credentials` would key
    pub fn deposit_id_for(
        &self,
        depositor: Address,
        credentials: &WithdrawalCredentials,
    ) -> DepositId {
        DepositId::derive(&self.address, &depositor, credentials)
    }

    /// Look up a ledger entry
    pub fn solo(&self, deposit_id: &DepositId) -> Option<&Solo> {
        self.solos.get(deposit_id)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.solos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solos.is_empty()
    }

    /// Native stake held by the ledger
    pub fn held(&self) -> StakeAmount {
        self.held
    }

    /// Sum of all live entry balances
    pub fn total_pending(&self) -> StakeAmount {
        self.solos
            .values()
            .fold(StakeAmount::ZERO, |acc, solo| acc.saturating_add(solo.balance))
    }

    /// Conservation check: held stake equals the sum of live balances
    pub fn is_balanced(&self) -> bool {
        self.held == self.total_pending()
    }

    /// Audit events emitted so far
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take the accumulated audit events, e.g. to persist them
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{OperatorSet, StaticParameters};
    use chrono::Duration;
    use solovault_core::ManualClock;

    const UNIT: StakeAmount = StakeAmount::new(32);

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    fn creds(n: u8) -> WithdrawalCredentials {
        WithdrawalCredentials::bls([n; 31])
    }

    struct NoopAuthority;

    impl RegistrationAuthority for NoopAuthority {
        fn activate(
            &self,
            _public_key: &ValidatorPublicKey,
            _withdrawal_credentials: &WithdrawalCredentials,
            _signature: &BlsSignature,
            _deposit_data_root: &DepositDataRoot,
            _stake: StakeAmount,
        ) -> Result<(), crate::error::CollaboratorError> {
            Ok(())
        }
    }

    struct NoopRegistry;

    impl ValidatorRegistry for NoopRegistry {
        fn record(
            &self,
            _public_key: &ValidatorPublicKey,
            _origin: DepositId,
        ) -> Result<(), crate::error::CollaboratorError> {
            Ok(())
        }
    }

    fn ledger(params: StaticParameters) -> (SoloDepositLedger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let mut operators = OperatorSet::new();
        operators.grant(addr(0xee));
        let ledger = SoloDepositLedger::new(
            addr(0xaa),
            Arc::new(params),
            Arc::new(operators),
            Arc::new(NoopAuthority),
            Arc::new(NoopRegistry),
            clock.clone(),
        );
        (ledger, clock)
    }

    fn default_params() -> StaticParameters {
        StaticParameters::new(UNIT, StakeAmount::new(32 * 100), Duration::days(1))
    }

    #[test]
    fn test_first_deposit_creates_entry() {
        let (mut ledger, clock) = ledger(default_params());

        let id = ledger.deposit(addr(1), creds(1), UNIT).unwrap();

        let solo = ledger.solo(&id).unwrap();
        assert_eq!(solo.balance, UNIT);
        assert_eq!(solo.withdrawal_credentials, creds(1));
        assert_eq!(solo.release_time, clock.now() + Duration::days(1));
        assert_eq!(ledger.held(), UNIT);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn test_paused_rejects_deposit() {
        let (mut ledger, _clock) = ledger(default_params().paused());

        let result = ledger.deposit(addr(1), creds(1), UNIT);
        assert_eq!(result, Err(LedgerError::Paused));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_ceiling_enforced() {
        let (mut ledger, _clock) = ledger(default_params());

        let over = StakeAmount::new(32 * 101);
        let result = ledger.deposit(addr(1), creds(1), over);
        assert!(matches!(result, Err(LedgerError::AboveCeiling { .. })));
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let (mut ledger, _clock) = ledger(default_params());

        let result = ledger.deposit(addr(1), creds(1), StakeAmount::ZERO);
        assert_eq!(result, Err(LedgerError::ZeroDeposit));
    }

    #[test]
    fn test_different_credentials_independent_entries() {
        let (mut ledger, _clock) = ledger(default_params());

        let a = ledger.deposit(addr(1), creds(1), UNIT).unwrap();
        let b = ledger.deposit(addr(1), creds(2), UNIT).unwrap();

        assert_ne!(a, b);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_cancel_unknown_deposit() {
        let (mut ledger, _clock) = ledger(default_params());

        let result = ledger.cancel(addr(1), &creds(1), UNIT);
        assert!(matches!(result, Err(LedgerError::UnknownDeposit(_))));
    }

    #[test]
    fn test_non_operator_cannot_activate() {
        let (mut ledger, _clock) = ledger(default_params());

        let result = ledger.activate_batch(addr(0x99), &[]);
        assert_eq!(result, Err(LedgerError::NotOperator(addr(0x99))));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let (mut ledger, _clock) = ledger(default_params());

        assert!(ledger.activate_batch(addr(0xee), &[]).is_ok());
    }

    #[test]
    fn test_activation_retains_zero_balance_entry() {
        let (mut ledger, clock) = ledger(default_params());

        let id = ledger.deposit(addr(1), creds(1), UNIT).unwrap();
        let release_before = ledger.solo(&id).unwrap().release_time;
        clock.advance(Duration::hours(2));

        let request = ActivationRequest {
            deposit_id: id,
            public_key: ValidatorPublicKey::new([0x01; 48]),
            signature: BlsSignature::new([0x02; 96]),
            deposit_data_root: DepositDataRoot::new([0x03; 32]),
        };
        ledger.activate_batch(addr(0xee), &[request]).unwrap();

        // Entry stays, emptied, with its release time untouched.
        let solo = ledger.solo(&id).unwrap();
        assert!(solo.balance.is_zero());
        assert_eq!(solo.release_time, release_before);
        assert!(ledger.is_balanced());
    }
}

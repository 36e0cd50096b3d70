//! DepositId - Deterministic ledger key
//!
//! Derived as SHA-256 over (ledger address, depositor address, withdrawal
//! credentials). Two deposits from the same account with the same
//! credentials collapse into one ledger entry; different credentials yield
//! independent entries. Collision probability is treated as negligible by
//! construction.

use crate::address::Address;
use crate::credentials::WithdrawalCredentials;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// The sole key into the deposit ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositId(#[serde(with = "hex::serde")] [u8; 32]);

impl DepositId {
    /// Derive the identity for a (ledger, depositor, credentials) triple.
    ///
    /// Pure and deterministic: equal inputs always produce the same id.
    pub fn derive(
        ledger: &Address,
        depositor: &Address,
        credentials: &WithdrawalCredentials,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ledger.as_bytes());
        hasher.update(depositor.as_bytes());
        hasher.update(credentials.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DepositId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

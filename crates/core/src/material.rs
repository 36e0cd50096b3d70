//! Activation material - opaque values forwarded to the registration
//! authority
//!
//! Sizes follow the Ethereum deposit format: 48-byte BLS public key,
//! 96-byte BLS signature, 32-byte deposit-data root. The ledger never
//! inspects or verifies any of these; it only forwards them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validator's 48-byte BLS public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidatorPublicKey(#[serde(with = "hex::serde")] [u8; 48]);

impl ValidatorPublicKey {
    pub const fn new(bytes: [u8; 48]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 48] {
        &self.0
    }
}

impl fmt::Display for ValidatorPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// An opaque 96-byte BLS signature over the deposit data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature(#[serde(with = "hex::serde")] [u8; 96]);

impl BlsSignature {
    pub const fn new(bytes: [u8; 96]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 96] {
        &self.0
    }
}

/// Integrity root committing to the full deposit data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepositDataRoot(#[serde(with = "hex::serde")] [u8; 32]);

impl DepositDataRoot {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

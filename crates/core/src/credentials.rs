//! WithdrawalCredentials - Opaque withdrawal destination descriptor
//!
//! A 32-byte value whose first byte MUST be the reserved BLS-withdrawal
//! marker. This is enforced at the type level: a `WithdrawalCredentials`
//! that exists is well-formed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Reserved marker byte identifying BLS-type withdrawal credentials
pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;

/// Errors that can occur when constructing withdrawal credentials
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Withdrawal credentials must start with the BLS marker 0x00, got 0x{0:02x}")]
    InvalidPrefix(u8),
}

/// Opaque 32-byte withdrawal destination, fixed for the lifetime of a
/// ledger entry.
///
/// # Invariant
/// The first byte equals `BLS_WITHDRAWAL_PREFIX`. This is enforced by the
/// constructor and preserved through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WithdrawalCredentials([u8; 32]);

impl WithdrawalCredentials {
    /// Create withdrawal credentials from raw bytes.
    ///
    /// Returns an error if the first byte is not the BLS marker.
    pub fn new(bytes: [u8; 32]) -> Result<Self, CredentialsError> {
        if bytes[0] != BLS_WITHDRAWAL_PREFIX {
            return Err(CredentialsError::InvalidPrefix(bytes[0]));
        }
        Ok(Self(bytes))
    }

    /// Create BLS credentials from the 31-byte destination body.
    pub fn bls(body: [u8; 31]) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = BLS_WITHDRAWAL_PREFIX;
        bytes[1..].copy_from_slice(&body);
        Self(bytes)
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The marker byte identifying the credential type
    pub const fn prefix(&self) -> u8 {
        self.0[0]
    }
}

impl fmt::Display for WithdrawalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for WithdrawalCredentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        hex::serde::serialize(self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for WithdrawalCredentials {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: [u8; 32] = hex::serde::deserialize(deserializer)?;
        Self::new(bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bls_prefix_accepted() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x01;
        let creds = WithdrawalCredentials::new(bytes).unwrap();
        assert_eq!(creds.prefix(), BLS_WITHDRAWAL_PREFIX);
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        let result = WithdrawalCredentials::new(bytes);
        assert!(matches!(result, Err(CredentialsError::InvalidPrefix(0x01))));
    }

    #[test]
    fn test_bls_constructor() {
        let creds = WithdrawalCredentials::bls([0xab; 31]);
        assert_eq!(creds.prefix(), BLS_WITHDRAWAL_PREFIX);
        assert_eq!(creds.as_bytes()[1], 0xab);
    }

    #[test]
    fn test_serde_preserves_invariant() {
        let creds = WithdrawalCredentials::bls([0x02; 31]);
        let json = serde_json::to_string(&creds).unwrap();
        let parsed: WithdrawalCredentials = serde_json::from_str(&json).unwrap();
        assert_eq!(creds, parsed);

        // A serialized value with a bad marker must not deserialize
        let bad = format!("\"01{}\"", "02".repeat(31));
        let result: Result<WithdrawalCredentials, _> = serde_json::from_str(&bad);
        assert!(result.is_err());
    }
}

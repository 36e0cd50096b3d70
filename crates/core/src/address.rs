//! Address - 20-byte account identity
//!
//! Used for depositors, trusted operators, and the ledger's own identity.
//! Displays as 0x-prefixed lowercase hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing an address
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("Expected 20 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A 20-byte account identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex::serde")] [u8; 20]);

impl Address {
    /// Create an address from raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)?;
        let len = bytes.len();
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(len))?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_prefix() {
        let addr: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(addr.as_bytes()[19], 0xff);
    }

    #[test]
    fn test_display_roundtrip() {
        let original = "0x0102030405060708090a0b0c0d0e0f1011121314";
        let addr: Address = original.parse().unwrap();
        assert_eq!(addr.to_string(), original);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result: Result<Address, _> = "0x0102".parse();
        assert!(matches!(result, Err(AddressError::InvalidLength(2))));
    }

    #[test]
    fn test_bad_hex_rejected() {
        let result: Result<Address, _> = "0xzz000000000000000000000000000000000000zz".parse();
        assert!(matches!(result, Err(AddressError::InvalidHex(_))));
    }
}

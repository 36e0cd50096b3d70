//! SoloVault Core - Domain primitives
//!
//! This crate contains the fundamental types used across SoloVault:
//! - `StakeAmount`: Unsigned wei quantity, all arithmetic checked
//! - `Address`: 20-byte account identity
//! - `WithdrawalCredentials`: BLS-prefixed withdrawal destination
//! - `DepositId`: Deterministic ledger key derived from (ledger, depositor, credentials)
//! - `Clock`: Injected time source so lock expiry is testable

pub mod address;
pub mod amount;
pub mod clock;
pub mod credentials;
pub mod identity;
pub mod material;

pub use address::{Address, AddressError};
pub use amount::StakeAmount;
pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::{CredentialsError, WithdrawalCredentials, BLS_WITHDRAWAL_PREFIX};
pub use identity::DepositId;
pub use material::{BlsSignature, DepositDataRoot, ValidatorPublicKey};

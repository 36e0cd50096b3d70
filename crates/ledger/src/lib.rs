//! SoloVault Ledger - Solo staking deposit accounting core
//!
//! This is the HEART of SoloVault. It holds pooled custody of deposits
//! earmarked for standing up independent validators and drives the
//! lifecycle from deposit intake through validator activation.
//!
//! # Key Types
//! - `SoloDepositLedger`: The per-depositor ledger and its three operations
//! - `Solo`: A single ledger entry (balance, credentials, lock expiry)
//! - `ActivationRequest`: One validator activation within a batch
//! - `LedgerError`: Every precondition violation, categorized
//!
//! External authorities (parameters, access control, validator
//! registration, validator record keeping) are injected once at
//! construction and immutable thereafter; see `traits`.

pub mod entry;
pub mod error;
pub mod event;
pub mod ledger;
pub mod traits;

pub use entry::Solo;
pub use error::{CollaboratorError, LedgerError, ViolationKind};
pub use event::LedgerEvent;
pub use ledger::{ActivationRequest, SoloDepositLedger};
pub use traits::{
    AccessAuthority, OperatorSet, ParameterProvider, RegistrationAuthority, StaticParameters,
    ValidatorRegistry,
};

//! SoloVault Events - Append-only audit trail persistence
//!
//! The ledger keeps its audit events in memory; this crate gives them a
//! durable sink. Events are appended as JSON lines to date-rotated files
//! and replayed in file order.

pub mod error;
pub mod reader;
pub mod store;

pub use error::EventError;
pub use reader::EventReader;
pub use store::EventStore;

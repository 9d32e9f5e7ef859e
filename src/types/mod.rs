//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the canonical record and its enumerations
//! - `error`: typed parse failures
//! - `diagnostic`: non-fatal reconciliation findings

pub mod diagnostic;
pub mod error;
pub mod transaction;

pub use diagnostic::{GapAlert, Inconsistency, InsertOutcome};
pub use error::ParseError;
pub use transaction::{
    Currency, Provider, TransactionRecord, TransactionType, UNKNOWN_MERCHANT,
};

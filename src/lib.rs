//! SMS Ledger Engine Library
//! # Overview
//!
//! This library parses financial SMS notifications from multiple providers
//! into canonical transaction records and reconciles account balances
//! across the resulting ledger, with both a sync and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TransactionRecord, ParseError, diagnostics)
//! - [`cli`] - CLI argument parsing
//! - [`parse`] - SMS parsing:
//!   - [`parse::extract`] - Per-field regex extractors over message text
//!   - [`parse::parser`] - Extractor composition into complete records
//! - [`core`] - Business logic components:
//!   - [`core::balance`] - Canonical balance arithmetic
//!   - [`core::reconciler`] - Chronological ledger with balance propagation
//!   - [`core::classifier`] - Merchant-keyword category suggestion
//! - [`io`] - SMS export reading and CSV export writing
//! - [`strategy`] - Pluggable processing strategies (sync, async batch)
//!
//! # Transaction Types
//!
//! The parser recognizes six transaction types by phrase scan:
//!
//! - **Send**: Person-to-person transfer out ("sent to")
//! - **Receive**: Money in ("received"), the only income type
//! - **PayBill**: Merchant or bill payment ("paid to")
//! - **CardPayment**: Card charge ("approved on your card")
//! - **BankTransfer**: Bank-to-wallet movement ("Bank to M-PESA transfer")
//! - **Unknown**: No known phrase matched
//!
//! # Reconciliation
//!
//! Each record may carry the account balance after (parsed) and before
//! (derived) the transaction. The ledger inserts records chronologically
//! and propagates balances forward, reporting inconsistencies and probable
//! missing transactions as diagnostics rather than errors.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod parse;
pub mod strategy;
pub mod types;

pub use crate::core::{Ledger, ReconcilerConfig};
pub use io::write_records_csv;
pub use parse::{ParserConfig, SmsParser};
pub use types::{
    Currency, GapAlert, Inconsistency, InsertOutcome, ParseError, Provider, TransactionRecord,
    TransactionType,
};

//! Reconciliation diagnostics
//!
//! Reconciliation never fails outright; it reports findings through the
//! value types in this module and leaves unresolvable balance fields as
//! `None`. The caller decides remediation (prompting the user, logging,
//! manual correction).

use crate::types::TransactionRecord;
use chrono::Duration;
use rust_decimal::Decimal;

/// Result of inserting a record into a ledger
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    /// The record as it landed in the ledger (balances possibly derived)
    pub inserted: TransactionRecord,

    /// Number of pre-existing records at or after the insertion point
    ///
    /// These are the records whose balance chain the insertion may have
    /// touched during recalculation.
    pub affected_count: usize,
}

/// A balance mismatch between two chronologically adjacent records
///
/// Emitted when `balance_after` of the earlier record and `balance_before`
/// of the later record are both known but differ by more than the
/// configured tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Inconsistency {
    /// The earlier of the two records
    pub earlier: TransactionRecord,

    /// The later of the two records
    pub later: TransactionRecord,

    /// `balance_after` of the earlier record
    pub expected_balance: Decimal,

    /// `balance_before` of the later record
    pub actual_balance: Decimal,

    /// Absolute difference between expected and actual
    pub difference: Decimal,
}

/// A heuristic flag that a transaction may be missing from the ledger
///
/// Emitted for adjacent record pairs separated by a large time gap whose
/// balances also moved by a large amount. Both thresholds are configuration,
/// not domain law (see `ReconcilerConfig`).
#[derive(Debug, Clone, PartialEq)]
pub struct GapAlert {
    /// The record bounding the gap from before
    pub after_transaction: TransactionRecord,

    /// The record bounding the gap from after
    pub before_transaction: TransactionRecord,

    /// Elapsed time between the two records
    pub time_gap: Duration,

    /// Absolute balance movement across the gap
    pub balance_gap: Decimal,
}

//! Balance reconciliation over a chronological ledger
//!
//! The [`Ledger`] is an immutable snapshot of transaction records ordered
//! by timestamp (ties broken by insertion order). Every mutating operation
//! takes `&self` and returns a new ledger plus diagnostics, so parsing can
//! be parallelized freely while reconciliation stays serialized through a
//! single ledger owner.
//!
//! # Propagation model
//!
//! Recalculation walks strictly forward from the insertion point:
//!
//! - a record with a known `balance_after` gets its `balance_before`
//!   derived from the canonical arithmetic;
//! - a record whose `balance_before` is unknown inherits the previous
//!   record's `balance_after` (adjacent balances are treated as continuous
//!   unless contradicted by data).
//!
//! This is not a two-sided solve: a record with neither a `balance_after`
//! nor an inherited `balance_before` stays unresolved, and a later known
//! balance is never propagated backwards into an earlier unknown one.
//!
//! # Failure semantics
//!
//! Reconciliation never fails. It reports findings through
//! [`Inconsistency`] and [`GapAlert`] values and leaves unresolvable
//! fields as `None`; the caller decides remediation.

use crate::core::balance::{derive_balance_after, derive_balance_before};
use crate::types::{GapAlert, Inconsistency, InsertOutcome, TransactionRecord};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Default tolerance when comparing adjacent balances (0.01 currency units)
pub const DEFAULT_BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default time gap before a pair is eligible for a gap alert
pub const DEFAULT_GAP_HOURS: i64 = 24;

/// Default minimum balance movement for a gap alert (1000 currency units)
pub const DEFAULT_GAP_MIN_DELTA: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Reconciler configuration
///
/// The 24-hour / 1000-unit gap heuristics and the 0.01 comparison
/// tolerance are operating defaults, not domain law, so they live here as
/// named configuration rather than literals in the algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcilerConfig {
    /// Maximum difference between adjacent balances still considered equal
    pub balance_tolerance: Decimal,

    /// Minimum elapsed time between adjacent records for a gap alert
    pub gap_duration: Duration,

    /// Minimum absolute balance movement for a gap alert
    pub gap_min_delta: Decimal,
}

impl ReconcilerConfig {
    /// Create a configuration, falling back to defaults for non-positive
    /// values
    pub fn new(balance_tolerance: Decimal, gap_duration: Duration, gap_min_delta: Decimal) -> Self {
        ReconcilerConfig {
            balance_tolerance: if balance_tolerance <= Decimal::ZERO {
                DEFAULT_BALANCE_TOLERANCE
            } else {
                balance_tolerance
            },
            gap_duration: if gap_duration <= Duration::zero() {
                Duration::hours(DEFAULT_GAP_HOURS)
            } else {
                gap_duration
            },
            gap_min_delta: if gap_min_delta <= Decimal::ZERO {
                DEFAULT_GAP_MIN_DELTA
            } else {
                gap_min_delta
            },
        }
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        ReconcilerConfig {
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            gap_duration: Duration::hours(DEFAULT_GAP_HOURS),
            gap_min_delta: DEFAULT_GAP_MIN_DELTA,
        }
    }
}

/// Chronologically ordered ledger of transaction records for one account
///
/// # Ordering
///
/// Records are sorted by timestamp. An inserted record lands before the
/// first existing record with a strictly greater timestamp, so records
/// sharing a timestamp keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
    config: ReconcilerConfig,
}

impl Ledger {
    /// Create an empty ledger with the default configuration
    pub fn new() -> Self {
        Self::with_config(ReconcilerConfig::default())
    }

    /// Create an empty ledger with an explicit configuration
    pub fn with_config(config: ReconcilerConfig) -> Self {
        Ledger {
            records: Vec::new(),
            config,
        }
    }

    /// The records in chronological order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Number of records in the ledger
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The active configuration
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Insert a record chronologically and recalculate affected balances
    ///
    /// Locates the first existing record with a strictly greater timestamp
    /// and inserts before it (append when none exists), then runs the
    /// forward balance recalculation from the insertion point.
    ///
    /// # Returns
    ///
    /// The new ledger snapshot and an [`InsertOutcome`] carrying the record
    /// as it landed plus the number of pre-existing records whose balance
    /// chain the insertion may have touched.
    pub fn insert(&self, record: TransactionRecord) -> (Ledger, InsertOutcome) {
        let mut records = self.records.clone();

        let index = records.partition_point(|existing| existing.timestamp <= record.timestamp);
        let affected_count = records.len() - index;

        records.insert(index, record);
        // Start one position early so the predecessor re-derives and hands
        // its balance_after to the inserted record.
        recalculate_from(&mut records, index.saturating_sub(1));

        let inserted = records[index].clone();
        (
            Ledger {
                records,
                config: self.config,
            },
            InsertOutcome {
                inserted,
                affected_count,
            },
        )
    }

    /// Validate balance consistency across adjacent records
    ///
    /// For every adjacent pair where the earlier `balance_after` and the
    /// later `balance_before` are both known, reports a mismatch larger
    /// than the configured tolerance. An empty result means the chain is
    /// consistent as far as the data allows.
    pub fn validate_consistency(&self) -> Vec<Inconsistency> {
        let mut inconsistencies = Vec::new();

        for pair in self.records.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            let (Some(expected), Some(actual)) = (earlier.balance_after, later.balance_before)
            else {
                continue;
            };

            let difference = (expected - actual).abs();
            if difference > self.config.balance_tolerance {
                inconsistencies.push(Inconsistency {
                    earlier: earlier.clone(),
                    later: later.clone(),
                    expected_balance: expected,
                    actual_balance: actual,
                    difference,
                });
            }
        }

        inconsistencies
    }

    /// Detect potential missing transactions from time/balance gaps
    ///
    /// For every adjacent pair with both bounding balances known, emits an
    /// alert when the elapsed time exceeds the configured gap duration
    /// **and** the balance moved by more than the configured minimum delta.
    /// Both thresholds are heuristics, tuned through [`ReconcilerConfig`].
    pub fn detect_missing_transactions(&self) -> Vec<GapAlert> {
        let mut alerts = Vec::new();

        for pair in self.records.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            let (Some(balance_at), Some(balance_resumed)) =
                (earlier.balance_after, later.balance_before)
            else {
                continue;
            };

            let time_gap = later.timestamp - earlier.timestamp;
            if time_gap <= self.config.gap_duration {
                continue;
            }

            let balance_gap = (balance_resumed - balance_at).abs();
            if balance_gap > self.config.gap_min_delta {
                alerts.push(GapAlert {
                    after_transaction: earlier.clone(),
                    before_transaction: later.clone(),
                    time_gap,
                    balance_gap,
                });
            }
        }

        alerts
    }

    /// Fill each record's missing balance side from its known side
    ///
    /// Record-local only: derives `balance_before` from a known
    /// `balance_after` and vice versa, using the canonical arithmetic.
    /// Cross-record propagation stays the job of insertion-time
    /// recalculation.
    pub fn fill_missing_balances(&self) -> Ledger {
        let mut records = self.records.clone();

        for record in &mut records {
            match (record.balance_after, record.balance_before) {
                (Some(after), None) => {
                    record.balance_before = Some(derive_balance_before(
                        after,
                        record.amount,
                        record.fees,
                        record.is_income(),
                    ));
                }
                (None, Some(before)) => {
                    record.balance_after = Some(derive_balance_after(
                        before,
                        record.amount,
                        record.fees,
                        record.is_income(),
                    ));
                }
                _ => {}
            }
        }

        Ledger {
            records,
            config: self.config,
        }
    }

    /// The most recent known account balance
    ///
    /// Taken from the latest record carrying a `balance_after`.
    pub fn latest_balance(&self) -> Option<Decimal> {
        self.records
            .iter()
            .rev()
            .find_map(|record| record.balance_after)
    }

    /// Total fees paid since the given instant
    pub fn fees_since(&self, since: DateTime<Utc>) -> Decimal {
        self.records
            .iter()
            .filter(|record| record.timestamp >= since)
            .map(|record| record.fees)
            .sum()
    }

    /// Balance movement across the given instant
    ///
    /// Compares the latest known balance at or after `since` with the
    /// latest known balance before it, and reports the magnitude of the
    /// difference plus whether the balance held or rose (`true`) or fell
    /// (`false`). A window with no known balance counts as zero. Returns
    /// `None` when no record on either side carries a balance.
    pub fn balance_trend(&self, since: DateTime<Utc>) -> Option<(Decimal, bool)> {
        let current = self
            .records
            .iter()
            .rev()
            .filter(|record| record.timestamp >= since)
            .find_map(|record| record.balance_after);
        let previous = self
            .records
            .iter()
            .rev()
            .filter(|record| record.timestamp < since)
            .find_map(|record| record.balance_after);
        if current.is_none() && previous.is_none() {
            return None;
        }
        let difference = current.unwrap_or(Decimal::ZERO) - previous.unwrap_or(Decimal::ZERO);
        Some((difference.abs(), difference >= Decimal::ZERO))
    }

    /// Net cash flow (income − expenses − fees) since the given instant
    pub fn net_cash_flow_since(&self, since: DateTime<Utc>) -> Decimal {
        let mut net = Decimal::ZERO;
        for record in self.records.iter().filter(|r| r.timestamp >= since) {
            if record.is_income() {
                net += record.amount;
            } else {
                net -= record.amount;
            }
            net -= record.fees;
        }
        net
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward balance recalculation from `index` to the end of the ledger
///
/// For each record at or after `index`, in order: derive `balance_before`
/// from a known `balance_after`, then hand the `balance_after` to the next
/// record's unknown `balance_before`. Strictly forward; never consults a
/// later record to resolve an earlier one.
fn recalculate_from(records: &mut [TransactionRecord], index: usize) {
    for i in index..records.len() {
        if let Some(after) = records[i].balance_after {
            records[i].balance_before = Some(derive_balance_before(
                after,
                records[i].amount,
                records[i].fees,
                records[i].is_income(),
            ));
        }

        if i + 1 < records.len() && records[i + 1].balance_before.is_none() {
            records[i + 1].balance_before = records[i].balance_after;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, Provider, TransactionType};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 30, 12, 0, 0).unwrap()
    }

    fn record(
        hours_offset: i64,
        tx_type: TransactionType,
        amount: Decimal,
        fees: Decimal,
        balance_after: Option<Decimal>,
    ) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4(),
            amount,
            currency: Currency::Kes,
            tx_type,
            merchant: "TEST MERCHANT".to_string(),
            timestamp: base_time() + Duration::hours(hours_offset),
            reference: format!("REF{hours_offset}"),
            provider: Provider::Mpesa,
            raw_message: String::new(),
            fees,
            account_number: None,
            phone_number: None,
            balance_after,
            balance_before: None,
        }
    }

    fn dec(units: i64) -> Decimal {
        Decimal::new(units, 0)
    }

    #[test]
    fn test_insert_into_empty_ledger() {
        let ledger = Ledger::new();
        let (ledger, outcome) = ledger.insert(record(
            0,
            TransactionType::Send,
            dec(100),
            Decimal::ZERO,
            Some(dec(900)),
        ));

        assert_eq!(ledger.len(), 1);
        assert_eq!(outcome.affected_count, 0);
        // balance_before derived from balance_after during recalculation
        assert_eq!(outcome.inserted.balance_before, Some(dec(1000)));
    }

    #[test]
    fn test_insert_keeps_chronological_order() {
        let ledger = Ledger::new();
        let (ledger, _) =
            ledger.insert(record(2, TransactionType::Send, dec(10), Decimal::ZERO, None));
        let (ledger, _) =
            ledger.insert(record(0, TransactionType::Send, dec(20), Decimal::ZERO, None));
        let (ledger, _) =
            ledger.insert(record(1, TransactionType::Send, dec(30), Decimal::ZERO, None));

        let amounts: Vec<Decimal> = ledger.records().iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec(20), dec(30), dec(10)]);
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let ledger = Ledger::new();
        let (ledger, _) =
            ledger.insert(record(0, TransactionType::Send, dec(1), Decimal::ZERO, None));
        let (ledger, outcome) =
            ledger.insert(record(0, TransactionType::Send, dec(2), Decimal::ZERO, None));

        // New record lands after the existing equal-timestamp record.
        assert_eq!(outcome.affected_count, 0);
        let amounts: Vec<Decimal> = ledger.records().iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec(1), dec(2)]);
    }

    #[test]
    fn test_insert_reports_affected_count() {
        let ledger = Ledger::new();
        let (ledger, _) =
            ledger.insert(record(1, TransactionType::Send, dec(10), Decimal::ZERO, None));
        let (ledger, _) =
            ledger.insert(record(2, TransactionType::Send, dec(10), Decimal::ZERO, None));

        // Inserting before both existing records affects both.
        let (_, outcome) =
            ledger.insert(record(0, TransactionType::Send, dec(10), Decimal::ZERO, None));
        assert_eq!(outcome.affected_count, 2);
    }

    #[test]
    fn test_insert_is_a_snapshot_not_a_mutation() {
        let ledger = Ledger::new();
        let (first, _) =
            ledger.insert(record(0, TransactionType::Send, dec(10), Decimal::ZERO, None));
        let (_second, _) =
            first.insert(record(1, TransactionType::Send, dec(20), Decimal::ZERO, None));

        assert_eq!(ledger.len(), 0);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_recalculation_propagates_balance_to_next_record() {
        let ledger = Ledger::new();
        // Expense of 100 + 1 fee, closing balance 899.
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::PayBill,
            dec(100),
            dec(1),
            Some(dec(899)),
        ));
        // Later record with no balance data inherits 899 as its opening.
        let (ledger, _) =
            ledger.insert(record(1, TransactionType::Send, dec(50), Decimal::ZERO, None));

        let records = ledger.records();
        assert_eq!(records[0].balance_before, Some(dec(1000)));
        assert_eq!(records[1].balance_before, Some(dec(899)));
        // No balance_after for the second record: propagation hands over
        // the opening balance only, it does not invent a closing one.
        assert_eq!(records[1].balance_after, None);
    }

    #[test]
    fn test_out_of_order_insert_recalculates_later_records() {
        let ledger = Ledger::new();
        let (ledger, _) =
            ledger.insert(record(2, TransactionType::Send, dec(50), Decimal::ZERO, None));
        // Earlier record arrives late, carrying balance data.
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Receive,
            dec(500),
            Decimal::ZERO,
            Some(dec(1500)),
        ));

        let records = ledger.records();
        assert_eq!(records[0].balance_before, Some(dec(1000)));
        // The pre-existing later record inherited the new closing balance.
        assert_eq!(records[1].balance_before, Some(dec(1500)));
    }

    #[test]
    fn test_no_backward_propagation() {
        let ledger = Ledger::new();
        // First record has no balance data at all.
        let (ledger, _) =
            ledger.insert(record(0, TransactionType::Send, dec(10), Decimal::ZERO, None));
        // Second record knows its balances.
        let (ledger, _) = ledger.insert(record(
            1,
            TransactionType::Send,
            dec(100),
            Decimal::ZERO,
            Some(dec(900)),
        ));

        let records = ledger.records();
        // The earlier record stays unresolved; its successor's knowledge
        // is never walked backwards.
        assert_eq!(records[0].balance_before, None);
        assert_eq!(records[0].balance_after, None);
    }

    #[test]
    fn test_validate_consistency_on_recalculated_ledger_is_clean() {
        let ledger = Ledger::new();
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Receive,
            dec(500),
            Decimal::ZERO,
            Some(dec(1500)),
        ));
        let (ledger, _) = ledger.insert(record(
            1,
            TransactionType::Send,
            dec(200),
            dec(5),
            Some(dec(1295)),
        ));
        let (ledger, _) = ledger.insert(record(
            2,
            TransactionType::PayBill,
            dec(95),
            Decimal::ZERO,
            Some(dec(1200)),
        ));

        assert!(ledger.validate_consistency().is_empty());
    }

    #[test]
    fn test_validate_consistency_flags_exactly_one_mismatch() {
        let ledger = Ledger::new();
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Send,
            dec(100),
            Decimal::ZERO,
            Some(dec(1000)),
        ));
        // Closing balance of 1000, but this record claims an opening of
        // 900 via its own balance_after arithmetic: after 700 + amount 200
        // => before 900, which mismatches the previous 1000 by 100.
        let (ledger, _) = ledger.insert(record(
            1,
            TransactionType::Send,
            dec(200),
            Decimal::ZERO,
            Some(dec(700)),
        ));

        let inconsistencies = ledger.validate_consistency();
        assert_eq!(inconsistencies.len(), 1);

        let finding = &inconsistencies[0];
        assert_eq!(finding.expected_balance, dec(1000));
        assert_eq!(finding.actual_balance, dec(900));
        assert_eq!(finding.difference, dec(100));
        assert_eq!(finding.earlier.amount, dec(100));
        assert_eq!(finding.later.amount, dec(200));
    }

    #[test]
    fn test_validate_consistency_respects_tolerance() {
        let mut within = record(
            0,
            TransactionType::Send,
            dec(100),
            Decimal::ZERO,
            Some(Decimal::new(100000, 2)), // 1000.00
        );
        within.balance_before = Some(Decimal::new(110000, 2));
        let mut next = record(1, TransactionType::Send, dec(50), Decimal::ZERO, None);
        // Differs from the previous closing balance by exactly 0.01,
        // inside the tolerance, not a finding.
        next.balance_before = Some(Decimal::new(100001, 2));

        let ledger = Ledger {
            records: vec![within, next],
            config: ReconcilerConfig::default(),
        };
        assert!(ledger.validate_consistency().is_empty());
    }

    #[test]
    fn test_validate_consistency_skips_unknown_balances() {
        let ledger = Ledger::new();
        let (ledger, _) =
            ledger.insert(record(0, TransactionType::Send, dec(10), Decimal::ZERO, None));
        let (ledger, _) =
            ledger.insert(record(1, TransactionType::Send, dec(20), Decimal::ZERO, None));

        assert!(ledger.validate_consistency().is_empty());
    }

    #[test]
    fn test_gap_alert_requires_both_thresholds() {
        let build = |hours: i64, next_after: i64| {
            let ledger = Ledger::new();
            let (ledger, _) = ledger.insert(record(
                0,
                TransactionType::Send,
                dec(100),
                Decimal::ZERO,
                Some(dec(10000)),
            ));
            let (ledger, _) = ledger.insert(record(
                hours,
                TransactionType::Send,
                dec(100),
                Decimal::ZERO,
                Some(dec(next_after)),
            ));
            ledger
        };

        // 48h gap and a 5000-unit drop: alert.
        let alerts = build(48, 4900).detect_missing_transactions();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].time_gap, Duration::hours(48));
        assert_eq!(alerts[0].balance_gap, dec(5000));

        // Large drop but only 2h elapsed: no alert.
        assert!(build(2, 4900).detect_missing_transactions().is_empty());

        // 48h elapsed but the balance only moved by the transaction
        // itself: no alert.
        assert!(build(48, 9800).detect_missing_transactions().is_empty());
    }

    #[test]
    fn test_gap_thresholds_are_configurable() {
        let config = ReconcilerConfig::new(
            DEFAULT_BALANCE_TOLERANCE,
            Duration::hours(1),
            dec(100),
        );
        let ledger = Ledger::with_config(config);
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Send,
            dec(50),
            Decimal::ZERO,
            Some(dec(1000)),
        ));
        let (ledger, _) = ledger.insert(record(
            3,
            TransactionType::Send,
            dec(50),
            Decimal::ZERO,
            Some(dec(450)),
        ));

        // 3h > 1h and |500 - 1000| = 500 > 100: flagged under the tighter
        // configuration, invisible under the defaults.
        assert_eq!(ledger.detect_missing_transactions().len(), 1);
    }

    #[test]
    fn test_reconciler_config_falls_back_on_non_positive_values() {
        let config = ReconcilerConfig::new(Decimal::ZERO, Duration::zero(), dec(-5));
        assert_eq!(config.balance_tolerance, DEFAULT_BALANCE_TOLERANCE);
        assert_eq!(config.gap_duration, Duration::hours(DEFAULT_GAP_HOURS));
        assert_eq!(config.gap_min_delta, DEFAULT_GAP_MIN_DELTA);
    }

    #[test]
    fn test_fill_missing_balances_derives_both_directions() {
        let mut forward = record(0, TransactionType::Send, dec(100), dec(1), None);
        forward.balance_before = Some(dec(1000));
        let backward = record(
            1,
            TransactionType::Receive,
            dec(500),
            Decimal::ZERO,
            Some(dec(1399)),
        );

        let ledger = Ledger {
            records: vec![forward, backward],
            config: ReconcilerConfig::default(),
        };
        let filled = ledger.fill_missing_balances();

        assert_eq!(filled.records()[0].balance_after, Some(dec(899)));
        assert_eq!(filled.records()[1].balance_before, Some(dec(899)));
        // Snapshot semantics: the original ledger is untouched.
        assert_eq!(ledger.records()[0].balance_after, None);
    }

    #[test]
    fn test_latest_balance_takes_most_recent_known() {
        let ledger = Ledger::new();
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Send,
            dec(10),
            Decimal::ZERO,
            Some(dec(500)),
        ));
        let (ledger, _) =
            ledger.insert(record(2, TransactionType::Send, dec(10), Decimal::ZERO, None));
        let (ledger, _) = ledger.insert(record(
            1,
            TransactionType::Send,
            dec(10),
            Decimal::ZERO,
            Some(dec(490)),
        ));

        // The hour-2 record has no balance; hour 1 is the latest known.
        assert_eq!(ledger.latest_balance(), Some(dec(490)));
    }

    #[test]
    fn test_fees_and_net_cash_flow_since() {
        let ledger = Ledger::new();
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Receive,
            dec(1000),
            Decimal::ZERO,
            None,
        ));
        let (ledger, _) =
            ledger.insert(record(1, TransactionType::Send, dec(300), dec(33), None));
        let (ledger, _) =
            ledger.insert(record(2, TransactionType::PayBill, dec(200), dec(7), None));

        let since = base_time();
        assert_eq!(ledger.fees_since(since), dec(40));
        // 1000 - 300 - 200 - 40 = 460
        assert_eq!(ledger.net_cash_flow_since(since), dec(460));

        // Window that excludes the income.
        let later = base_time() + Duration::minutes(30);
        assert_eq!(ledger.net_cash_flow_since(later), dec(-540));
    }

    #[test]
    fn test_appended_record_inherits_predecessor_balance() {
        let ledger = Ledger::new();
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::PayBill,
            dec(100),
            dec(1),
            Some(dec(899)),
        ));
        // Appended at the tail with no balance data of its own.
        let (ledger, _) =
            ledger.insert(record(1, TransactionType::Send, dec(50), Decimal::ZERO, None));

        assert_eq!(ledger.records()[1].balance_before, Some(dec(899)));
    }

    #[test]
    fn test_balance_trend_reports_direction_and_magnitude() {
        let ledger = Ledger::new();
        let (ledger, _) = ledger.insert(record(
            0,
            TransactionType::Send,
            dec(10),
            Decimal::ZERO,
            Some(dec(500)),
        ));
        let (ledger, _) = ledger.insert(record(
            2,
            TransactionType::Receive,
            dec(150),
            Decimal::ZERO,
            Some(dec(650)),
        ));

        let boundary = base_time() + Duration::hours(1);
        // 650 now versus 500 before the boundary.
        assert_eq!(ledger.balance_trend(boundary), Some((dec(150), true)));

        // Flip the windows: 500 now versus 650 before.
        let (falling, _) = Ledger::new().insert(record(
            0,
            TransactionType::Send,
            dec(10),
            Decimal::ZERO,
            Some(dec(650)),
        ));
        let (falling, _) = falling.insert(record(
            2,
            TransactionType::Send,
            dec(150),
            Decimal::ZERO,
            Some(dec(500)),
        ));
        assert_eq!(falling.balance_trend(boundary), Some((dec(150), false)));
    }

    #[test]
    fn test_balance_trend_without_known_balances() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance_trend(base_time()), None);

        let (ledger, _) =
            ledger.insert(record(0, TransactionType::Send, dec(10), Decimal::ZERO, None));
        let (ledger, _) =
            ledger.insert(record(2, TransactionType::Send, dec(10), Decimal::ZERO, None));
        assert_eq!(
            ledger.balance_trend(base_time() + Duration::hours(1)),
            None
        );
    }

    #[test]
    fn test_balance_trend_treats_empty_window_as_zero() {
        let (ledger, _) = Ledger::new().insert(record(
            0,
            TransactionType::Receive,
            dec(300),
            Decimal::ZERO,
            Some(dec(300)),
        ));

        // Nothing before the boundary: the whole current balance is the move.
        let before_everything = base_time() - Duration::hours(1);
        assert_eq!(
            ledger.balance_trend(before_everything),
            Some((dec(300), true))
        );

        // Nothing after the boundary: the known balance reads as a drop to zero.
        let after_everything = base_time() + Duration::hours(1);
        assert_eq!(
            ledger.balance_trend(after_everything),
            Some((dec(300), false))
        );
    }
}

//! Processing strategy module for SMS import pipelines
//!
//! This module defines the Strategy pattern for complete import pipelines,
//! encompassing SMS parsing, ledger reconciliation, and CSV export. This
//! allows different processing implementations (synchronous, asynchronous
//! batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::{Ledger, ReconcilerConfig};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete SMS import pipelines
///
/// Each strategy must be able to read messages from an SMS export file,
/// parse and reconcile them into a ledger, and write the reconciled
/// records to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process messages from the input file and write results to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the SMS export file (one message per line)
    /// * `output` - Mutable reference to a writer for the reconciled CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed (possibly with recoverable errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error)
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions: the input file cannot be
    /// opened, a fatal I/O error occurs, or output cannot be written.
    /// Individual message parse failures are logged to stderr and
    /// processing continues with the next message.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// Factory selecting the strategy implementation at runtime. The batch
/// configuration applies to the async strategy only; the reconciler
/// configuration applies to both.
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create
/// * `batch_config` - Optional async batch configuration (ignored for sync)
/// * `reconciler_config` - Ledger reconciliation thresholds
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    batch_config: Option<BatchConfig>,
    reconciler_config: ReconcilerConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(reconciler_config)),
        StrategyType::Async => {
            let batch_config = batch_config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(batch_config, reconciler_config))
        }
    }
}

/// Report reconciliation findings to stderr
///
/// Findings are advisory: they never fail the pipeline, they surface on
/// stderr so the exported CSV on stdout stays clean.
pub(crate) fn emit_diagnostics(ledger: &Ledger) {
    for finding in ledger.validate_consistency() {
        eprintln!(
            "Balance inconsistency: expected {} but found {} between {} and {} (difference {})",
            finding.expected_balance,
            finding.actual_balance,
            finding.earlier.reference,
            finding.later.reference,
            finding.difference
        );
    }

    for alert in ledger.detect_missing_transactions() {
        eprintln!(
            "Possible missing transactions: {} hour(s) and {} moved between {} and {}",
            alert.time_gap.num_hours(),
            alert.balance_gap,
            alert.after_transaction.reference,
            alert.before_transaction.reference
        );
    }
}

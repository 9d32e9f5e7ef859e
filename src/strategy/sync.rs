//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of
//! the ProcessingStrategy trait. It orchestrates the import by coordinating
//! between the MessageReader (for SMS input), the Ledger (for
//! reconciliation), and the csv_format module (for output).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - message parsing to `MessageReader` (iterator interface)
//! - balance reconciliation to `Ledger` (business logic)
//! - CSV output to `csv_format::write_records_csv` (format handling)
//!
//! # Memory Efficiency
//!
//! Messages are streamed one at a time; only the reconciled ledger is held
//! in memory, which insertion ordering requires anyway.

use crate::core::Ledger;
use crate::core::ReconcilerConfig;
use crate::io::csv_format::write_records_csv;
use crate::io::message_reader::MessageReader;
use crate::strategy::{emit_diagnostics, ProcessingStrategy};
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// Implements the ProcessingStrategy trait using single-threaded,
/// streaming processing: each message is parsed and inserted into the
/// ledger before the next one is read.
///
/// # Examples
///
/// ```no_run
/// use sms_ledger_engine::core::ReconcilerConfig;
/// use sms_ledger_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ReconcilerConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("messages.txt"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    reconciler_config: ReconcilerConfig,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy with the given reconciler
    /// thresholds
    pub fn new(reconciler_config: ReconcilerConfig) -> Self {
        Self { reconciler_config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process messages from the input file and write results to output
    ///
    /// The pipeline:
    /// 1. Streams messages from the export file via MessageReader
    /// 2. Inserts each parsed record chronologically into the ledger
    /// 3. Reports balance inconsistencies and gap alerts to stderr
    /// 4. Fills record-local missing balances
    /// 5. Writes the reconciled records as CSV
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual message failures are logged to stderr and processing
    /// continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let reader = MessageReader::new(input_path)?;
        let mut ledger = Ledger::with_config(self.reconciler_config);

        for result in reader {
            match result {
                Ok(record) => {
                    let (next, _outcome) = ledger.insert(record);
                    ledger = next;
                }
                Err(e) => {
                    eprintln!("Message parsing error: {}", e);
                }
            }
        }

        emit_diagnostics(&ledger);

        let ledger = ledger.fill_missing_balances();
        write_records_csv(ledger.records(), output)?;

        Ok(())
    }
}

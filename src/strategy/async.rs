//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of
//! the ProcessingStrategy trait. Messages are parsed in concurrent batches;
//! reconciliation stays serialized, because ledger insertion is an ordered
//! fold by construction.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── tokio runtime + task-per-chunk parsing (CPU-bound, shared-nothing)
//!     └── Ledger (serialized insertion and diagnostics)
//! ```
//!
//! # Ordering
//!
//! Parsing concurrently must not scramble ledger chronology. Every line is
//! assigned its timestamp before being handed to a task: a single base
//! instant plus one microsecond per line index. Task completion order then
//! cannot affect the ledger, which orders by timestamp.

use crate::core::{Ledger, ReconcilerConfig};
use crate::io::csv_format::write_records_csv;
use crate::parse::SmsParser;
use crate::strategy::{emit_diagnostics, ProcessingStrategy};
use chrono::{DateTime, Duration, Utc};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

/// Configuration for batch processing
///
/// Controls how messages are batched and the number of worker tasks for
/// parallel parsing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of messages per batch
    pub batch_size: usize,
    /// Maximum number of parse tasks running concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to defaults with a warning on stderr.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// An input line tagged with its position and pre-assigned timestamp
#[derive(Debug, Clone)]
struct NumberedLine {
    line_num: usize,
    timestamp: DateTime<Utc>,
    text: String,
}

/// Asynchronous batch processing strategy
///
/// Implements the ProcessingStrategy trait using multi-threaded batch
/// parsing. Batches are processed sequentially; within each batch, lines
/// are partitioned across worker tasks that share one compiled parser.
/// Parsed records are then folded into the ledger in input order.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    batch_config: BatchConfig,
    reconciler_config: ReconcilerConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(batch_config: BatchConfig, reconciler_config: ReconcilerConfig) -> Self {
        Self {
            batch_config,
            reconciler_config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process messages from the input file and write results to output
    ///
    /// The pipeline:
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads the export line by line, numbering and timestamping each
    ///    non-blank message
    /// 3. Parses each batch across concurrent worker tasks
    /// 4. Folds parsed records into the ledger serially
    /// 5. Reports diagnostics to stderr and writes the reconciled CSV
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors, runtime construction) are
    /// returned immediately. Individual message failures are logged to
    /// stderr and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.batch_config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            let parser = Arc::new(SmsParser::new());
            let mut ledger = Ledger::with_config(self.reconciler_config);

            let mut lines = tokio::io::BufReader::new(file).lines();
            let base = Utc::now();
            let mut line_num = 0usize;
            let mut message_index = 0i64;
            let mut batch: Vec<NumberedLine> = Vec::with_capacity(self.batch_config.batch_size);

            loop {
                let line = lines
                    .next_line()
                    .await
                    .map_err(|e| format!("Failed to read '{}': {}", input_path.display(), e))?;

                let done = match line {
                    Some(text) => {
                        line_num += 1;
                        if !text.trim().is_empty() {
                            batch.push(NumberedLine {
                                line_num,
                                // One microsecond per message keeps ledger
                                // order equal to file order regardless of
                                // task completion order.
                                timestamp: base + Duration::microseconds(message_index),
                                text,
                            });
                            message_index += 1;
                        }
                        false
                    }
                    None => true,
                };

                if batch.len() >= self.batch_config.batch_size || (done && !batch.is_empty()) {
                    let drained = std::mem::take(&mut batch);
                    ledger = parse_batch(
                        drained,
                        Arc::clone(&parser),
                        self.batch_config.max_concurrent_batches,
                        ledger,
                    )
                    .await;
                }

                if done {
                    break;
                }
            }

            emit_diagnostics(&ledger);

            let ledger = ledger.fill_missing_balances();
            write_records_csv(ledger.records(), output)?;

            Ok(())
        })
    }
}

/// Parse one batch across worker tasks and fold the results into the ledger
///
/// Lines are partitioned into contiguous chunks, one task per chunk.
/// `join_all` yields task results in spawn order, so flattening restores
/// input order for the serialized fold.
async fn parse_batch(
    batch: Vec<NumberedLine>,
    parser: Arc<SmsParser>,
    max_concurrent: usize,
    mut ledger: Ledger,
) -> Ledger {
    let chunk_size = batch.len().div_ceil(max_concurrent).max(1);
    let chunks: Vec<Vec<NumberedLine>> = batch
        .chunks(chunk_size)
        .map(|chunk| chunk.to_vec())
        .collect();

    let tasks = chunks.into_iter().map(|chunk| {
        let parser = Arc::clone(&parser);
        tokio::spawn(async move {
            chunk
                .into_iter()
                .map(|line| {
                    let result = parser
                        .parse_at(&line.text, line.timestamp)
                        .map_err(|e| format!("Line {}: {}", line.line_num, e));
                    (line.line_num, result)
                })
                .collect::<Vec<_>>()
        })
    });

    for task_result in futures::future::join_all(tasks).await {
        match task_result {
            Ok(results) => {
                for (_line_num, result) in results {
                    match result {
                        Ok(record) => {
                            let (next, _outcome) = ledger.insert(record);
                            ledger = next;
                        }
                        Err(e) => eprintln!("Message parsing error: {}", e),
                    }
                }
            }
            Err(e) => eprintln!("Parse task failed: {}", e),
        }
    }

    ledger
}

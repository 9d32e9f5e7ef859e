//! SMS Ledger Engine CLI
//!
//! Command-line interface for importing SMS transaction exports and
//! reconciling account balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- messages.txt > transactions.csv
//! cargo run -- --strategy sync messages.txt > transactions.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 messages.txt > transactions.csv
//! cargo run -- --gap-hours 48 --gap-amount 2500 messages.txt > transactions.csv
//! ```
//!
//! The program reads one SMS message per line from the input file, parses
//! each into a transaction record, reconciles balances across the
//! resulting ledger, and writes the reconciled records as CSV to stdout.
//! Parse failures and reconciliation findings go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Single-threaded streaming parse and reconcile
//! - **async**: Concurrent batch parsing with serialized reconciliation (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use sms_ledger_engine::cli;
use sms_ledger_engine::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();

    let strategy = {
        let batch_config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        let reconciler_config = args.to_reconciler_config();
        strategy::create_strategy(args.strategy, batch_config, reconciler_config)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

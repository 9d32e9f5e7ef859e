use crate::core::reconciler::{
    ReconcilerConfig, DEFAULT_BALANCE_TOLERANCE, DEFAULT_GAP_HOURS, DEFAULT_GAP_MIN_DELTA,
};
use crate::strategy::BatchConfig;
use chrono::Duration;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Parse SMS transaction exports and reconcile account balances
#[derive(Parser, Debug)]
#[command(name = "sms-ledger-engine")]
#[command(about = "Parse SMS transaction exports and reconcile account balances", long_about = None)]
pub struct CliArgs {
    /// Input SMS export file path, one message per line
    #[arg(value_name = "INPUT", help = "Path to the SMS export file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for importing messages
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of messages per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of messages per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent parse tasks (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of parse tasks running concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Time threshold for missing-transaction detection
    #[arg(
        long = "gap-hours",
        value_name = "HOURS",
        help = "Hours between adjacent records before a gap alert is considered (default: 24)"
    )]
    pub gap_hours: Option<i64>,

    /// Balance threshold for missing-transaction detection
    #[arg(
        long = "gap-amount",
        value_name = "AMOUNT",
        help = "Minimum balance movement for a gap alert (default: 1000)"
    )]
    pub gap_amount: Option<Decimal>,
}

/// Available processing strategies for SMS import
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses CLI values where provided and defaults otherwise; zero values
    /// produce stderr warnings inside `BatchConfig::new`.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create a ReconcilerConfig from CLI arguments
    ///
    /// The balance comparison tolerance is not CLI-tunable; only the gap
    /// detection thresholds are.
    pub fn to_reconciler_config(&self) -> ReconcilerConfig {
        ReconcilerConfig::new(
            DEFAULT_BALANCE_TOLERANCE,
            Duration::hours(self.gap_hours.unwrap_or(DEFAULT_GAP_HOURS)),
            self.gap_amount.unwrap_or(DEFAULT_GAP_MIN_DELTA),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "messages.txt"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "messages.txt"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "messages.txt"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    // Individual config option tests
    #[rstest]
    #[case::batch_size(&["program", "--batch-size", "2000", "messages.txt"], Some(2000), None)]
    #[case::max_concurrent(&["program", "--max-concurrent", "8", "messages.txt"], None, Some(8))]
    #[case::no_options(&["program", "messages.txt"], None, None)]
    #[case::all_options(
        &["program", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "messages.txt"],
        Some(2000),
        Some(8)
    )]
    fn test_config_options(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] max_concurrent: Option<usize>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.max_concurrent_batches, max_concurrent);
    }

    // BatchConfig conversion tests with valid values
    #[rstest]
    #[case::all_defaults(&["program", "messages.txt"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "messages.txt"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "messages.txt"], 1000, 8)]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[test]
    fn test_reconciler_config_defaults() {
        let parsed = CliArgs::try_parse_from(["program", "messages.txt"]).unwrap();
        let config = parsed.to_reconciler_config();

        assert_eq!(config.gap_duration, Duration::hours(24));
        assert_eq!(config.gap_min_delta, Decimal::new(1000, 0));
        assert_eq!(config.balance_tolerance, DEFAULT_BALANCE_TOLERANCE);
    }

    #[test]
    fn test_reconciler_config_custom_thresholds() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--gap-hours",
            "48",
            "--gap-amount",
            "2500.50",
            "messages.txt",
        ])
        .unwrap();
        let config = parsed.to_reconciler_config();

        assert_eq!(config.gap_duration, Duration::hours(48));
        assert_eq!(config.gap_min_delta, Decimal::new(250050, 2));
    }

    // Error handling tests
    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "messages.txt"])]
    #[case::non_numeric_gap_amount(&["program", "--gap-amount", "lots", "messages.txt"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}

//! CSV export for reconciled transaction records
//!
//! Centralizes the output format: column set, field rendering, and the
//! suggested-category lookup. All functions are pure with respect to the
//! ledger (the writer is the only side effect), which keeps the format
//! easy to test against in-memory buffers.

use crate::core::classifier::{classify, default_categories};
use crate::types::TransactionRecord;
use rust_decimal::Decimal;
use std::io::Write;

/// Column header of the export format
const HEADER: [&str; 14] = [
    "id",
    "timestamp",
    "provider",
    "type",
    "merchant",
    "amount",
    "currency",
    "fees",
    "reference",
    "account_number",
    "phone_number",
    "balance_before",
    "balance_after",
    "category",
];

/// Write transaction records to CSV
///
/// One row per record, in the order given (callers pass ledger order for
/// chronological output). Timestamps are RFC 3339, monetary fields are
/// rendered with two decimal places, unknown balances are empty cells, and
/// the category column carries the classifier's suggestion.
///
/// # Arguments
///
/// * `records` - Records to export, already in the desired order
/// * `output` - Writer receiving the CSV bytes
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_records_csv(
    records: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);
    let categories = default_categories();

    writer
        .write_record(HEADER)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for record in records {
        let category = classify(record, &categories).unwrap_or_default();
        writer
            .write_record(&[
                record.id.to_string(),
                record.timestamp.to_rfc3339(),
                record.provider.to_string(),
                record.tx_type.to_string(),
                record.merchant.clone(),
                format!("{:.2}", record.amount),
                record.currency.to_string(),
                format!("{:.2}", record.fees),
                record.reference.clone(),
                record.account_number.clone().unwrap_or_default(),
                record.phone_number.clone().unwrap_or_default(),
                render_balance(record.balance_before),
                render_balance(record.balance_after),
                category,
            ])
            .map_err(|e| format!("Failed to write transaction record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Render an optional balance with two decimal places, empty when unknown
fn render_balance(balance: Option<Decimal>) -> String {
    balance.map(|b| format!("{:.2}", b)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Currency, Provider, TransactionType};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn sample_record() -> TransactionRecord {
        TransactionRecord {
            id: Uuid::nil(),
            amount: Decimal::new(200000, 2),
            currency: Currency::Kes,
            tx_type: TransactionType::Send,
            merchant: "PENUEL NTHENYA".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 8, 30, 13, 47, 0).unwrap(),
            reference: "THU3LTRGTL".to_string(),
            provider: Provider::Mpesa,
            raw_message: String::new(),
            fees: Decimal::new(3300, 2),
            account_number: None,
            phone_number: Some("0748322517".to_string()),
            balance_after: Some(Decimal::new(9896658, 2)),
            balance_before: Some(Decimal::new(10099958, 2)),
        }
    }

    #[test]
    fn test_header_row() {
        let mut output = Vec::new();
        write_records_csv(&[], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "id,timestamp,provider,type,merchant,amount,currency,fees,reference,account_number,phone_number,balance_before,balance_after,category\n"
        );
    }

    #[test]
    fn test_record_row_rendering() {
        let mut output = Vec::new();
        write_records_csv(&[sample_record()], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let row = output_str.lines().nth(1).unwrap();

        assert!(row.starts_with("00000000-0000-0000-0000-000000000000,"));
        assert!(row.contains("2025-08-30T13:47:00+00:00"));
        assert!(row.contains("MPESA,send,PENUEL NTHENYA,2000.00,KES,33.00,THU3LTRGTL"));
        assert!(row.contains("0748322517"));
        assert!(row.contains("100999.58,98966.58"));
        // Send to a person with no keyword hits suggests "Other".
        assert!(row.ends_with("Other"));
    }

    #[test]
    fn test_unknown_balances_are_empty_cells() {
        let mut record = sample_record();
        record.balance_after = None;
        record.balance_before = None;
        record.phone_number = None;

        let mut output = Vec::new();
        write_records_csv(&[record], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let row = output_str.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();

        assert_eq!(fields[10], ""); // phone_number
        assert_eq!(fields[11], ""); // balance_before
        assert_eq!(fields[12], ""); // balance_after
    }

    #[test]
    fn test_rows_preserve_input_order() {
        let mut first = sample_record();
        first.reference = "FIRST00001".to_string();
        let mut second = sample_record();
        second.reference = "SECOND0001".to_string();

        let mut output = Vec::new();
        write_records_csv(&[first, second], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output_str.lines().collect();
        assert!(lines[1].contains("FIRST00001"));
        assert!(lines[2].contains("SECOND0001"));
    }

    #[test]
    fn test_income_row_gets_income_category() {
        let mut record = sample_record();
        record.tx_type = TransactionType::Receive;
        record.merchant = "IM BANK LIMITED- APP".to_string();

        let mut output = Vec::new();
        write_records_csv(&[record], &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.lines().nth(1).unwrap().ends_with("Income"));
    }
}

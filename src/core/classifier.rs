//! Merchant-name category suggestion
//!
//! Maps a transaction record to a suggested budget category using keyword
//! rules keyed off the transaction type and the uppercased merchant name.
//! The rules are heuristics over free-text merchant strings, so the
//! function suggests rather than decides: a suggestion is only returned
//! when it names a category the caller actually knows about.

use crate::types::{TransactionRecord, TransactionType};

/// Built-in category names, covering everything the rules can suggest
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Healthcare",
    "Bills & Utilities",
    "Education",
    "Income",
    "Other",
];

/// The built-in category set as owned strings
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

/// Suggest a budget category for a transaction record
///
/// # Arguments
///
/// * `record` - The transaction to classify
/// * `known_categories` - The category names the caller recognizes
///
/// # Returns
///
/// The suggested category name, or `None` when the rules produce a name
/// absent from `known_categories`.
pub fn classify(record: &TransactionRecord, known_categories: &[String]) -> Option<String> {
    let suggestion = suggest(record);
    if known_categories.iter().any(|name| name == suggestion) {
        Some(suggestion.to_string())
    } else {
        None
    }
}

/// Raw rule evaluation, independent of the caller's category set
fn suggest(record: &TransactionRecord) -> &'static str {
    let merchant = record.merchant.to_uppercase();

    match record.tx_type {
        TransactionType::CardPayment => {
            if merchant.contains("OPENAI") || merchant.contains("CHATGPT") {
                return "Other";
            }
            if merchant.contains("RESTAURANT")
                || merchant.contains("CAFE")
                || merchant.contains("FOOD")
            {
                return "Food & Dining";
            }
            if merchant.contains("FUEL") || merchant.contains("PETROL") || merchant.contains("GAS")
            {
                return "Transportation";
            }
            "Shopping"
        }
        TransactionType::PayBill => {
            if merchant.contains("LIQUOR") || merchant.contains("BAR") || merchant.contains("CLUB")
            {
                return "Entertainment";
            }
            if merchant.contains("SUPERMARKET")
                || merchant.contains("STORE")
                || merchant.contains("SHOP")
            {
                return "Shopping";
            }
            if merchant.contains("HOSPITAL")
                || merchant.contains("CLINIC")
                || merchant.contains("PHARMACY")
            {
                return "Healthcare";
            }
            "Bills & Utilities"
        }
        TransactionType::Send => {
            if merchant.contains("RENT") || merchant.contains("LANDLORD") {
                return "Bills & Utilities";
            }
            if merchant.contains("SCHOOL")
                || merchant.contains("UNIVERSITY")
                || merchant.contains("EDUCATION")
            {
                return "Education";
            }
            "Other"
        }
        TransactionType::Receive => "Income",
        TransactionType::BankTransfer | TransactionType::Unknown => "Other",
    }
}

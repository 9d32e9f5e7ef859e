//! Field extractors for provider SMS grammars
//!
//! Each extractor is an independent, pure function over the normalized
//! message text. Extractors return `Option`; absence of a field is a
//! value, not an error, so every degradation path is visible in the
//! parser's composition rather than hidden in optional chaining.
//!
//! # Grammar notes
//!
//! The patterns are derived from real provider messages (M-PESA, LOOP,
//! I&M, PesaLink). They are loosely specified natural-language templates,
//! so each pattern captures lazily up to a small set of terminators
//! (`on`, `for`, a period, end of text) rather than asserting a full
//! message shape.

use crate::types::{Currency, Provider, TransactionType};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Compiled extraction patterns
///
/// Compiled once and shared by every extractor call; the parser owns one
/// instance for its lifetime. All patterns are hard-coded literals, so
/// construction cannot fail at runtime.
#[derive(Debug)]
pub struct Patterns {
    /// Currency-tagged amount; tag in group 1, digits in group 2
    amount: Regex,
    /// Transaction cost; digits in group 1
    fee: Regex,
    /// 8-12 char alphanumeric token immediately before "Confirmed"
    reference: Regex,
    /// Numeric "Transaction Ref ID" used by bank transfer messages
    reference_numeric: Regex,
    /// Running balance; signed digits in group 1 (negative = overdraft)
    balance: Regex,
    /// Outbound counterparty: "paid to <NAME>" / "sent to <NAME>"
    merchant_outbound: Regex,
    /// Inbound counterparty: "from <NAME>"
    merchant_inbound: Regex,
    /// Card counterparty: "at <NAME>"
    merchant_card: Regex,
    /// Bank-transfer counterparty: "to <msisdn> - <NAME>"
    merchant_bank: Regex,
    /// Masked account fragment: "A/C ****3450"
    account: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        Patterns {
            amount: compile(r"(?i)\b(Ksh|KES|USD\.?|EUR|GBP)\s*([0-9][0-9,]*\.?[0-9]*)"),
            fee: compile(r"(?i)(?:Transaction cost|cost)[,:\s]*(?:Ksh|KES)\s*([0-9][0-9,]*\.?[0-9]*)"),
            reference: compile(r"\b([A-Z0-9]{8,12})\s+Confirmed"),
            reference_numeric: compile(r"(?i)Transaction Ref ID[:\s]*([0-9]{6,})"),
            balance: compile(
                r"(?i)(?:M-PESA balance|Available balance|balance)[:\s]*(?:is\s*)?(?:Ksh|KES)\s*(-?[0-9][0-9,]*\.?[0-9]*)",
            ),
            merchant_outbound: compile(
                r"(?i)(?:paid to|sent to)\s+([A-Z0-9\s&().-]+?)(?:\s+on\b|\s+for\b|\.|$)",
            ),
            merchant_inbound: compile(
                r"(?i)from\s+([A-Z0-9\s&().-]+?)(?:\s+on\b|\s+for\b|\s+into\b|\.|$)",
            ),
            merchant_card: compile(r"(?i)\bat\s+([A-Z0-9\s&().*-]+?)(?:\s+on\b|\.|$)"),
            merchant_bank: compile(
                r"(?i)to\s+([0-9]{9,12})\s*-\s*([A-Z\s().-]+?)(?:\s+successfully\b|\s+on\b|\.|$)",
            ),
            account: compile(r"(?i)A/C\s*\*+([0-9]+)"),
        }
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are compile-time literals; a failure here is a programming
    // error, not an input condition.
    Regex::new(pattern).expect("hard-coded pattern is valid")
}

/// A merchant capture together with any phone number peeled off its tail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantCapture {
    pub name: String,
    pub phone_number: Option<String>,
}

/// Extract the transaction amount and its currency
///
/// Scans for the first currency-tagged numeric token in the message.
/// Positional first-match, so the transaction amount wins over any balance
/// or fee amounts that appear later in the template. Thousands separators
/// are stripped before decimal parsing.
pub fn amount(patterns: &Patterns, message: &str) -> Option<(Decimal, Currency)> {
    let caps = patterns.amount.captures(message)?;
    let currency = currency_for_tag(caps.get(1)?.as_str());
    let value = parse_decimal(caps.get(2)?.as_str())?;
    Some((value, currency))
}

fn currency_for_tag(tag: &str) -> Currency {
    let tag = tag.to_uppercase();
    if tag.starts_with("KSH") || tag.starts_with("KES") {
        Currency::Kes
    } else if tag.starts_with("USD") {
        Currency::Usd
    } else if tag.starts_with("EUR") {
        Currency::Eur
    } else if tag.starts_with("GBP") {
        Currency::Gbp
    } else {
        Currency::Unknown
    }
}

/// Classify the transaction type by ordered phrase scan
///
/// The order is a strict priority, acting as a tie-break rule: a message
/// containing both "sent to" and "received" classifies as Send no matter
/// where the phrases sit in the text.
pub fn transaction_type(message: &str) -> TransactionType {
    let upper = message.to_uppercase();

    if upper.contains("SENT TO") {
        TransactionType::Send
    } else if upper.contains("PAID TO") {
        TransactionType::PayBill
    } else if upper.contains("RECEIVED") {
        TransactionType::Receive
    } else if upper.contains("ON YOUR CARD") {
        TransactionType::CardPayment
    } else if upper.contains("BANK TO M-PESA TRANSFER") {
        TransactionType::BankTransfer
    } else {
        TransactionType::Unknown
    }
}

/// Extract the transaction cost, if the message carries one
pub fn fee(patterns: &Patterns, message: &str) -> Option<Decimal> {
    let caps = patterns.fee.captures(message)?;
    parse_decimal(caps.get(1)?.as_str())
}

/// Extract the provider reference
///
/// Tries the `<TOKEN> Confirmed` form first (mobile-money receipts), then
/// the numeric `Transaction Ref ID` form used by bank transfer messages.
pub fn reference(patterns: &Patterns, message: &str) -> Option<String> {
    if let Some(caps) = patterns.reference.captures(message) {
        return Some(caps.get(1)?.as_str().to_string());
    }
    let caps = patterns.reference_numeric.captures(message)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Extract the post-transaction running balance
///
/// Supports negative values for overdrawn accounts.
pub fn balance_after(patterns: &Patterns, message: &str) -> Option<Decimal> {
    let caps = patterns.balance.captures(message)?;
    parse_decimal(caps.get(1)?.as_str())
}

/// Extract the counterparty name, selecting the pattern by transaction type
///
/// Outbound captures (Send/PayBill) routinely trail into the recipient's
/// phone number; a trailing all-digit token is peeled off and reported as
/// the phone number rather than part of the name.
pub fn merchant(
    patterns: &Patterns,
    message: &str,
    tx_type: TransactionType,
) -> Option<MerchantCapture> {
    match tx_type {
        TransactionType::Receive => {
            let caps = patterns.merchant_inbound.captures(message)?;
            Some(MerchantCapture {
                name: caps.get(1)?.as_str().trim().to_string(),
                phone_number: None,
            })
        }
        TransactionType::CardPayment => {
            let caps = patterns.merchant_card.captures(message)?;
            Some(MerchantCapture {
                name: caps.get(1)?.as_str().trim().to_string(),
                phone_number: None,
            })
        }
        TransactionType::BankTransfer => {
            let caps = patterns.merchant_bank.captures(message)?;
            Some(MerchantCapture {
                name: caps.get(2)?.as_str().trim().to_string(),
                phone_number: Some(caps.get(1)?.as_str().to_string()),
            })
        }
        _ => {
            let caps = patterns.merchant_outbound.captures(message)?;
            Some(strip_trailing_phone(caps.get(1)?.as_str().trim()))
        }
    }
}

/// Peel a trailing phone-number token off an outbound merchant capture
fn strip_trailing_phone(capture: &str) -> MerchantCapture {
    let mut tokens: Vec<&str> = capture.split_whitespace().collect();
    let mut phone_number = None;

    if let Some(last) = tokens.last() {
        if last.len() >= 9 && last.chars().all(|c| c.is_ascii_digit()) {
            phone_number = Some(last.to_string());
            tokens.pop();
        }
    }

    MerchantCapture {
        name: tokens.join(" "),
        phone_number,
    }
}

/// Extract a masked account-number fragment (e.g. PesaLink `A/C ****3450`)
pub fn account_number(patterns: &Patterns, message: &str) -> Option<String> {
    let caps = patterns.account.captures(message)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Detect the issuing service provider by keyword scan
///
/// Scan order: M-PESA, PESALINK, LOOP, I&M. Defaults to M-PESA for the
/// Kenyan mobile-money context when nothing matches.
pub fn provider(message: &str) -> Provider {
    let upper = message.to_uppercase();

    if upper.contains("M-PESA") || upper.contains("MPESA") {
        Provider::Mpesa
    } else if upper.contains("PESALINK") {
        Provider::Pesalink
    } else if upper.contains("LOOP") {
        Provider::Loop
    } else if upper.contains("I&M") {
        Provider::ImBank
    } else {
        Provider::Mpesa
    }
}

/// Parse a captured numeric token, stripping thousands separators
fn parse_decimal(token: &str) -> Option<Decimal> {
    let cleaned = token.replace(',', "");
    let cleaned = cleaned.trim_end_matches('.');
    Decimal::from_str(cleaned).ok()
}

//! Transaction-related types for the SMS Ledger Engine
//!
//! This module defines the canonical transaction record produced by the SMS
//! parser, along with the enumerations (transaction type, currency, service
//! provider) used throughout the system.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default merchant name when the counterparty cannot be resolved
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Transaction types recognized in provider SMS notifications
///
/// Each variant corresponds to a phrase family observed in sample messages.
/// Classification is an ordered scan: `sent to` beats `paid to` beats
/// `received`, regardless of where the phrases appear in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Person-to-person transfer out of the account ("sent to")
    Send,

    /// Money received into the account ("received")
    Receive,

    /// Merchant/bill payment ("paid to")
    PayBill,

    /// Card charge notification ("... approved on your card ... at ...")
    CardPayment,

    /// Interbank or bank-to-wallet transfer ("Bank to M-PESA transfer of ...")
    BankTransfer,

    /// No known phrase matched
    Unknown,
}

impl TransactionType {
    /// Whether this transaction type moves money into the account
    ///
    /// Only [`TransactionType::Receive`] is income; every other type is an
    /// expense for balance-arithmetic purposes.
    pub fn is_income(self) -> bool {
        self == TransactionType::Receive
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Send => "send",
            TransactionType::Receive => "receive",
            TransactionType::PayBill => "pay_bill",
            TransactionType::CardPayment => "card_payment",
            TransactionType::BankTransfer => "bank_transfer",
            TransactionType::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

/// Currencies observed in provider messages
///
/// Derived from whichever currency tag matched the amount. `Unknown` is
/// representable for forward compatibility but the sampled grammars always
/// carry a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Kes,
    Usd,
    Eur,
    Gbp,
    Unknown,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Currency::Kes => "KES",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Unknown => "UNKNOWN",
        };
        write!(f, "{label}")
    }
}

/// Financial service providers that issue SMS notifications
///
/// Detected by keyword scan over the raw message. Defaults to
/// [`Provider::Mpesa`] when no keyword matches, since the sampled corpus is
/// Kenyan mobile-money traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    Mpesa,
    Loop,
    ImBank,
    Pesalink,
    Unknown,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provider::Mpesa => "MPESA",
            Provider::Loop => "LOOP",
            Provider::ImBank => "IM_BANK",
            Provider::Pesalink => "PESALINK",
            Provider::Unknown => "UNKNOWN",
        };
        write!(f, "{label}")
    }
}

/// Canonical transaction record parsed from one SMS message
///
/// Created exclusively by the parser; parsing either yields a complete
/// record or a typed failure, never a partial record. After creation the
/// record is immutable except for the two balance fields, which the
/// reconciler may backfill while propagating balances along the ledger.
///
/// # Invariants
///
/// - `amount > 0`
/// - `fees >= 0`
/// - `merchant` is never empty
/// - when both balance fields are present they satisfy the canonical
///   balance arithmetic within a 0.01 tolerance (see [`crate::core::balance`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque unique identifier, generated at creation
    pub id: Uuid,

    /// Transaction amount; always positive
    pub amount: Decimal,

    /// Currency of the amount, derived from the matched currency tag
    pub currency: Currency,

    /// Classified transaction type
    pub tx_type: TransactionType,

    /// Counterparty name; never empty, defaults to [`UNKNOWN_MERCHANT`]
    pub merchant: String,

    /// Point in time used for ledger ordering
    ///
    /// Stamped at parse time; the embedded message date is not parsed.
    /// Callers that control chronology use `SmsParser::parse_at`.
    pub timestamp: DateTime<Utc>,

    /// Provider transaction id, or a synthesized `SMS-<secs>-<n>` token
    pub reference: String,

    /// Issuing service provider
    pub provider: Provider,

    /// Original message text, retained for audit and diagnostics
    pub raw_message: String,

    /// Transaction cost; zero when the message carries none
    pub fees: Decimal,

    /// Account number fragment (e.g. PesaLink `A/C ****3450`), if present
    pub account_number: Option<String>,

    /// Counterparty phone number, if present
    pub phone_number: Option<String>,

    /// Account balance immediately after this transaction, if known
    ///
    /// May be negative (overdraft).
    pub balance_after: Option<Decimal>,

    /// Account balance immediately before this transaction, if known
    pub balance_before: Option<Decimal>,
}

impl TransactionRecord {
    /// Whether this record represents income
    pub fn is_income(&self) -> bool {
        self.tx_type.is_income()
    }
}

//! SMS message parser
//!
//! Composes the field extractors into a single canonical
//! [`TransactionRecord`] or a typed failure.
//!
//! # Failure policy
//!
//! Only a missing amount (or empty input) is fatal. Every other field
//! degrades to a documented default: merchant falls back to
//! `"Unknown Merchant"`, fees to zero, the reference to a synthesized
//! token, the provider to M-PESA, and the balance fields to `None`. The
//! asymmetry reflects the grammars' reliability ranking: amount is always
//! present in real messages; merchant, fees and balance are not.
//!
//! # Timestamps
//!
//! Records are stamped at parse time. The date embedded in the message
//! text is deliberately not parsed; callers that control chronology (batch
//! importers, tests) use [`SmsParser::parse_at`].

use crate::core::balance::derive_balance_before;
use crate::parse::extract::{self, Patterns};
use crate::types::{ParseError, TransactionRecord, TransactionType, UNKNOWN_MERCHANT};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Default cap on merchant tokens for outbound captures
pub const DEFAULT_MERCHANT_MAX_TOKENS: usize = 3;

// Process-wide counter so synthesized references stay unique under rapid
// successive parses within the same second.
static SYNTH_REF_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Parser configuration
///
/// Exposes the merchant-truncation cap instead of hard-coding it. The cap
/// applies to outbound (Send/PayBill) captures only: outbound grammars
/// trail into phone numbers and dates, while inbound `from <NAME>`
/// counterparties are bank names that routinely exceed three tokens and
/// are taken verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum whitespace-separated tokens kept from an outbound merchant
    /// capture (0 falls back to the default)
    pub merchant_max_tokens: usize,
}

impl ParserConfig {
    pub fn new(merchant_max_tokens: usize) -> Self {
        let merchant_max_tokens = if merchant_max_tokens == 0 {
            DEFAULT_MERCHANT_MAX_TOKENS
        } else {
            merchant_max_tokens
        };
        ParserConfig {
            merchant_max_tokens,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            merchant_max_tokens: DEFAULT_MERCHANT_MAX_TOKENS,
        }
    }
}

/// Multi-provider SMS transaction parser
///
/// Owns the compiled extraction patterns; construct once and reuse across
/// messages. Parsing is a pure function over the input text plus the
/// wall-clock time used for the default timestamp and synthetic reference.
///
/// # Examples
///
/// ```
/// use sms_ledger_engine::parse::SmsParser;
///
/// let parser = SmsParser::new();
/// let record = parser
///     .parse("THU3LTRGTL Confirmed. Ksh2,000.00 sent to PENUEL NTHENYA 0748322517 on 30/8/25.")
///     .unwrap();
/// assert_eq!(record.merchant, "PENUEL NTHENYA");
/// ```
#[derive(Debug)]
pub struct SmsParser {
    patterns: Patterns,
    config: ParserConfig,
}

impl SmsParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with an explicit configuration
    pub fn with_config(config: ParserConfig) -> Self {
        SmsParser {
            patterns: Patterns::new(),
            config,
        }
    }

    /// Parse one raw SMS message into a canonical record
    ///
    /// Stamps the record with the current wall-clock time.
    ///
    /// # Errors
    ///
    /// * [`ParseError::UnrecognizedFormat`] if the input is empty after
    ///   normalization
    /// * [`ParseError::MissingAmount`] if no currency-tagged numeric token
    ///   matched; the normalized text rides along as diagnostic payload
    pub fn parse(&self, raw_text: &str) -> Result<TransactionRecord, ParseError> {
        self.parse_at(raw_text, Utc::now())
    }

    /// Parse one raw SMS message, stamping an explicit timestamp
    ///
    /// Batch importers and tests use this to control ledger chronology;
    /// the wall clock is otherwise only consulted for the synthetic
    /// reference.
    pub fn parse_at(
        &self,
        raw_text: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord, ParseError> {
        let message = normalize(raw_text);
        if message.is_empty() {
            return Err(ParseError::unrecognized_format(&message));
        }

        // Amount is the only fatal field.
        let (amount, currency) = extract::amount(&self.patterns, &message)
            .ok_or_else(|| ParseError::missing_amount(&message))?;

        let tx_type = extract::transaction_type(&message);

        let capture = extract::merchant(&self.patterns, &message, tx_type);
        let phone_number = capture.as_ref().and_then(|c| c.phone_number.clone());
        let merchant = capture
            .map(|c| self.shape_merchant(c.name, tx_type))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());

        let fees = extract::fee(&self.patterns, &message).unwrap_or(Decimal::ZERO);

        let reference = extract::reference(&self.patterns, &message)
            .unwrap_or_else(|| synthesize_reference(timestamp));

        let balance_after = extract::balance_after(&self.patterns, &message);
        // Derive the opening balance up front so the record is
        // self-consistent at creation time.
        let balance_before = balance_after
            .map(|after| derive_balance_before(after, amount, fees, tx_type.is_income()));

        let provider = extract::provider(&message);
        let account_number = extract::account_number(&self.patterns, &message);

        Ok(TransactionRecord {
            id: Uuid::new_v4(),
            amount,
            currency,
            tx_type,
            merchant,
            timestamp,
            reference,
            provider,
            raw_message: message,
            fees,
            account_number,
            phone_number,
            balance_after,
            balance_before,
        })
    }

    /// Apply the outbound token cap
    fn shape_merchant(&self, name: String, tx_type: TransactionType) -> String {
        match tx_type {
            TransactionType::Send | TransactionType::PayBill | TransactionType::Unknown => name
                .split_whitespace()
                .take(self.config.merchant_max_tokens)
                .collect::<Vec<_>>()
                .join(" "),
            _ => name,
        }
    }
}

impl Default for SmsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse whitespace runs and trim the ends
fn normalize(raw_text: &str) -> String {
    raw_text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build a `SMS-<unix-seconds>-<n>` reference for messages without one
///
/// The monotonic counter keeps references unique when many messages are
/// imported within the same second.
fn synthesize_reference(timestamp: DateTime<Utc>) -> String {
    let n = SYNTH_REF_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("SMS-{}-{}", timestamp.timestamp(), n)
}

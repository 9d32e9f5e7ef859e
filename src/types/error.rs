//! Error types for the SMS Ledger Engine
//!
//! This module defines the typed parse failures produced by the SMS parser.
//! Errors are designed to be descriptive and to keep the raw message (and
//! any partially extracted values) attached for diagnostics.
//!
//! # Failure policy
//!
//! Only two conditions abort a parse:
//!
//! - **UnrecognizedFormat**: empty input or a grammar that matched nothing
//! - **MissingAmount**: no currency-tagged numeric token found
//!
//! Every other condition (missing merchant, missing fee, missing balance,
//! unknown provider) degrades to a documented default and is never surfaced
//! as an error. The remaining variants exist for collaborators that perform
//! stricter validation on already-parsed records.

use thiserror::Error;

/// Main error type for SMS parsing
///
/// Each variant carries the raw message so a failed parse can always be
/// traced back to the text that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or matched no known grammar
    ///
    /// This is a fatal error; no record is produced.
    #[error("SMS format not recognized")]
    UnrecognizedFormat {
        /// The normalized message that failed to match
        raw_message: String,
    },

    /// No currency-tagged numeric amount matched
    ///
    /// This is a fatal error; amount is the one field every sampled
    /// provider grammar reliably carries.
    #[error("could not extract transaction amount")]
    MissingAmount {
        /// The normalized message that failed to match
        raw_message: String,
    },

    /// Merchant/recipient could not be identified
    #[error("could not identify merchant or recipient")]
    MissingMerchant {
        /// The normalized message
        raw_message: String,
    },

    /// No transaction date found in the message
    #[error("could not extract transaction date")]
    MissingDate {
        /// The normalized message
        raw_message: String,
    },

    /// A matched amount token failed decimal parsing
    #[error("invalid amount format '{value}'")]
    InvalidAmount {
        /// The token that failed to parse
        value: String,
        /// The normalized message
        raw_message: String,
    },

    /// A matched date token failed parsing
    #[error("invalid date format '{value}'")]
    InvalidDate {
        /// The token that failed to parse
        value: String,
        /// The normalized message
        raw_message: String,
    },

    /// The issuing provider is not supported
    #[error("service provider not supported")]
    UnsupportedProvider {
        /// The normalized message
        raw_message: String,
    },
}

// Helper constructors for the common variants

impl ParseError {
    /// Create an UnrecognizedFormat error
    pub fn unrecognized_format(raw_message: &str) -> Self {
        ParseError::UnrecognizedFormat {
            raw_message: raw_message.to_string(),
        }
    }

    /// Create a MissingAmount error
    pub fn missing_amount(raw_message: &str) -> Self {
        ParseError::MissingAmount {
            raw_message: raw_message.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(value: &str, raw_message: &str) -> Self {
        ParseError::InvalidAmount {
            value: value.to_string(),
            raw_message: raw_message.to_string(),
        }
    }

    /// The raw message attached to this error
    ///
    /// Every variant keeps the message it failed on, so diagnostics are
    /// never silently discarded.
    pub fn raw_message(&self) -> &str {
        match self {
            ParseError::UnrecognizedFormat { raw_message }
            | ParseError::MissingAmount { raw_message }
            | ParseError::MissingMerchant { raw_message }
            | ParseError::MissingDate { raw_message }
            | ParseError::InvalidAmount { raw_message, .. }
            | ParseError::InvalidDate { raw_message, .. }
            | ParseError::UnsupportedProvider { raw_message } => raw_message,
        }
    }
}

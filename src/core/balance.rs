//! Canonical balance arithmetic
//!
//! The two derivations here are the single source of truth for how a
//! transaction moves an account balance; the parser and the reconciler
//! both go through them. They must remain exact inverses of one another:
//!
//! ```text
//! income:   before = after − amount            after = before + amount
//! expense:  before = after + amount + fees     after = before − amount − fees
//! ```
//!
//! All arithmetic is `rust_decimal::Decimal`, so the round trip is exact
//! with no float tolerance involved.

use rust_decimal::Decimal;

/// Derive the balance immediately before a transaction from the balance
/// immediately after it
pub fn derive_balance_before(
    balance_after: Decimal,
    amount: Decimal,
    fees: Decimal,
    is_income: bool,
) -> Decimal {
    if is_income {
        balance_after - amount
    } else {
        balance_after + amount + fees
    }
}

/// Derive the balance immediately after a transaction from the balance
/// immediately before it
pub fn derive_balance_after(
    balance_before: Decimal,
    amount: Decimal,
    fees: Decimal,
    is_income: bool,
) -> Decimal {
    if is_income {
        balance_before + amount
    } else {
        balance_before - amount - fees
    }
}

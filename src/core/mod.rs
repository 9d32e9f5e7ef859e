//! Core ledger logic: balance arithmetic, reconciliation, and category
//! suggestion

pub mod balance;
pub mod classifier;
pub mod reconciler;

pub use balance::{derive_balance_after, derive_balance_before};
pub use classifier::{classify, default_categories};
pub use reconciler::{Ledger, ReconcilerConfig};

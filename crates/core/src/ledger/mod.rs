//! Trust-account double-entry ledger logic.
//!
//! This module implements the core ledger functionality:
//! - The debit/credit polarity rule (the single source of truth)
//! - The posting planner turning transactions into entry pairs
//! - Statement reconstruction with opening balance derivation
//! - Business rule validation
//! - Transaction method and instrument kind types
//! - Error types for ledger operations

pub mod error;
pub mod polarity;
pub mod posting;
pub mod statement;
pub mod types;
pub mod validation;

#[cfg(test)]
mod posting_props;
#[cfg(test)]
mod statement_props;

pub use error::LedgerError;
pub use polarity::{AccountClass, EntrySide, Movement, Polarity, balance_change, polarity};
pub use posting::{EntryPlan, PostingRequest, PriorBalances, plan_entries};
pub use statement::{
    DisplayAmounts, EarliestEntry, SortOrder, Statement, StatementRow, display_amounts,
    opening_balance,
};
pub use types::{TransactionKind, TransactionMethod, VOUCHER_PLACEHOLDER};

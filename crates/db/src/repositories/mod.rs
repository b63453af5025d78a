//! Repository abstractions for data access.
//!
//! Repositories translate between SeaORM models and the core domain types,
//! and map database failures into the core error taxonomy. Domain rules
//! live in `custodia-core`; nothing here re-implements them.

pub mod ledger;
pub mod owner;
pub mod transaction;
pub mod unit;

pub use ledger::LedgerRepository;
pub use owner::OwnerRepository;
pub use transaction::TransactionRepository;
pub use unit::UnitRepository;

use custodia_core::ledger::LedgerError;
use sea_orm::DbErr;

/// Maps a database error into the core taxonomy.
///
/// Serialization failures and deadlocks become the retryable
/// [`LedgerError::Conflict`]; everything else is surfaced verbatim.
pub(crate) fn map_db_err(err: DbErr) -> LedgerError {
    if is_serialization_failure(&err) {
        return LedgerError::Conflict;
    }
    LedgerError::Database(err.to_string())
}

/// Detects Postgres serialization failures (40001) and deadlocks (40P01).
fn is_serialization_failure(err: &DbErr) -> bool {
    let message = err.to_string();
    message.contains("40001")
        || message.contains("40P01")
        || message.contains("could not serialize")
        || message.contains("deadlock detected")
}

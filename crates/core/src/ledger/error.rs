//! Ledger error types for validation, business-rule, and state errors.
//!
//! One taxonomy for the whole posting path: validation errors (bad input
//! shape), business-rule errors (inactive owner, unit mismatch, SYSTEM
//! misuse), registry protection errors, transaction state errors, and
//! retryable concurrency conflicts. Everything except `Conflict` and
//! `Database` is detected before any write.

use rust_decimal::Decimal;
use thiserror::Error;

use custodia_shared::error::AppError;
use custodia_shared::types::{AmountError, OwnerId, TransactionId, UnitId};

use crate::registry::OwnerStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Amount is outside the accepted [0.01, 999999999.99] range.
    #[error("Amount {0} is outside the accepted range")]
    AmountOutOfRange(Decimal),

    /// Amount carries more than two fractional digits.
    #[error("Amount {0} has more than two decimal places")]
    AmountTooPrecise(Decimal),

    /// Particulars must be a non-empty description.
    #[error("Particulars must not be empty")]
    EmptyParticulars,

    /// Voucher date is required when a voucher number is provided.
    #[error("Voucher date is required when voucher number is provided")]
    MissingVoucherDate,

    // ========== Business Rule Errors ==========
    /// Owner not found.
    #[error("Owner not found: {0}")]
    OwnerNotFound(OwnerId),

    /// Owner is not ACTIVE and cannot take part in new transactions.
    #[error("Owner {id} is {status} and cannot take part in transactions")]
    OwnerInactive {
        /// The owner ID.
        id: OwnerId,
        /// The owner's current status.
        status: OwnerStatus,
    },

    /// From owner and to owner cannot be the same account.
    #[error("From owner and to owner cannot be the same: {0}")]
    SameOwner(OwnerId),

    /// Unit not found.
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    /// Unit does not belong to the receiving owner.
    #[error("Unit {unit_id} does not belong to owner {owner_id}")]
    UnitOwnershipMismatch {
        /// The unit on the transaction.
        unit_id: UnitId,
        /// The receiving owner.
        owner_id: OwnerId,
    },

    /// Unit is not ACTIVE and cannot take new postings.
    #[error("Unit {0} is not active")]
    UnitInactive(UnitId),

    /// The SYSTEM owner may only appear on opening transactions.
    #[error("SYSTEM owner {0} is only allowed on opening transactions")]
    SystemOwnerRestricted(OwnerId),

    /// No SYSTEM owner has been seeded.
    #[error("SYSTEM owner not found; seed the SYSTEM owner first")]
    SystemOwnerMissing,

    /// Opening balances may only target CLIENT or COMPANY owners.
    #[error("Opening balance can only be assigned to a CLIENT or COMPANY owner, not {0}")]
    OpeningTargetInvalid(OwnerId),

    /// Opening transactions must originate from the SYSTEM owner.
    #[error("Opening transactions must originate from the SYSTEM owner, not {0}")]
    OpeningSourceNotSystem(OwnerId),

    /// The target stream already has entries; opening balances seed
    /// only fresh streams.
    #[error("Owner {owner_id} already has ledger entries for this stream; opening balance is not allowed")]
    OpeningBalanceExists {
        /// The receiving owner.
        owner_id: OwnerId,
        /// The unit stream, when the opening targets a unit.
        unit_id: Option<UnitId>,
    },

    // ========== Registry Protection Errors ==========
    /// The SYSTEM owner cannot be modified or removed.
    #[error("Owner {0} is the SYSTEM owner and cannot be modified")]
    SystemOwnerProtected(OwnerId),

    /// A unit's owner cannot change once it has ledger entries.
    #[error("Unit {0} has ledger entries; its owner cannot change")]
    UnitOwnerImmutable(UnitId),

    // ========== Transaction State Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Posted transactions are immutable.
    #[error("Transaction {0} is posted and cannot be modified")]
    TransactionPosted(TransactionId),

    /// Voucher numbers must be unique across transactions.
    #[error("Voucher number already exists: {0}")]
    DuplicateVoucher(String),

    // ========== Concurrency Errors ==========
    /// Lost a lock or serialization race; the posting may be retried.
    #[error("Concurrent posting detected, please retry")]
    Conflict,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::AmountTooPrecise(_) => "AMOUNT_TOO_PRECISE",
            Self::EmptyParticulars => "EMPTY_PARTICULARS",
            Self::MissingVoucherDate => "MISSING_VOUCHER_DATE",
            Self::OwnerNotFound(_) => "OWNER_NOT_FOUND",
            Self::OwnerInactive { .. } => "OWNER_INACTIVE",
            Self::SameOwner(_) => "SAME_OWNER",
            Self::UnitNotFound(_) => "UNIT_NOT_FOUND",
            Self::UnitOwnershipMismatch { .. } => "UNIT_OWNERSHIP_MISMATCH",
            Self::UnitInactive(_) => "UNIT_INACTIVE",
            Self::SystemOwnerRestricted(_) => "SYSTEM_OWNER_RESTRICTED",
            Self::SystemOwnerMissing => "SYSTEM_OWNER_MISSING",
            Self::OpeningTargetInvalid(_) => "OPENING_TARGET_INVALID",
            Self::OpeningSourceNotSystem(_) => "OPENING_SOURCE_NOT_SYSTEM",
            Self::OpeningBalanceExists { .. } => "OPENING_BALANCE_EXISTS",
            Self::SystemOwnerProtected(_) => "SYSTEM_OWNER_PROTECTED",
            Self::UnitOwnerImmutable(_) => "UNIT_OWNER_IMMUTABLE",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::TransactionPosted(_) => "TRANSACTION_POSTED",
            Self::DuplicateVoucher(_) => "DUPLICATE_VOUCHER",
            Self::Conflict => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::AmountOutOfRange(_)
            | Self::AmountTooPrecise(_)
            | Self::EmptyParticulars
            | Self::MissingVoucherDate => 400,

            // 404 Not Found
            Self::OwnerNotFound(_)
            | Self::UnitNotFound(_)
            | Self::SystemOwnerMissing
            | Self::TransactionNotFound(_) => 404,

            // 409 Conflict - concurrency and duplicates
            Self::Conflict | Self::DuplicateVoucher(_) => 409,

            // 422 Unprocessable - business rule violations
            Self::OwnerInactive { .. }
            | Self::SameOwner(_)
            | Self::UnitOwnershipMismatch { .. }
            | Self::UnitInactive(_)
            | Self::SystemOwnerRestricted(_)
            | Self::OpeningTargetInvalid(_)
            | Self::OpeningSourceNotSystem(_)
            | Self::OpeningBalanceExists { .. }
            | Self::SystemOwnerProtected(_)
            | Self::UnitOwnerImmutable(_)
            | Self::TransactionPosted(_) => 422,

            // 500 Internal Server Error
            Self::Database(_) => 500,
        }
    }

    /// Returns true if the operation may be retried as-is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

impl From<AmountError> for LedgerError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::OutOfRange(value) => Self::AmountOutOfRange(value),
            AmountError::TooPrecise(value) => Self::AmountTooPrecise(value),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            400 => Self::Validation(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::BusinessRule(message),
            _ => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::AmountOutOfRange(dec!(0)).error_code(),
            "AMOUNT_OUT_OF_RANGE"
        );
        assert_eq!(
            LedgerError::SameOwner(OwnerId::new()).error_code(),
            "SAME_OWNER"
        );
        assert_eq!(LedgerError::Conflict.error_code(), "CONFLICT");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::MissingVoucherDate.http_status_code(), 400);
        assert_eq!(
            LedgerError::OwnerNotFound(OwnerId::new()).http_status_code(),
            404
        );
        assert_eq!(LedgerError::Conflict.http_status_code(), 409);
        assert_eq!(
            LedgerError::OwnerInactive {
                id: OwnerId::new(),
                status: OwnerStatus::Suspended,
            }
            .http_status_code(),
            422
        );
        assert_eq!(
            LedgerError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_only_conflict_is_retryable() {
        assert!(LedgerError::Conflict.is_retryable());
        assert!(!LedgerError::EmptyParticulars.is_retryable());
        assert!(!LedgerError::Database("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_amount_error_conversion() {
        let err: LedgerError = AmountError::OutOfRange(dec!(-1)).into();
        assert!(matches!(err, LedgerError::AmountOutOfRange(_)));
        let err: LedgerError = AmountError::TooPrecise(dec!(1.005)).into();
        assert!(matches!(err, LedgerError::AmountTooPrecise(_)));
    }

    #[test]
    fn test_app_error_bridge_follows_status() {
        let app: AppError = LedgerError::MissingVoucherDate.into();
        assert!(matches!(app, AppError::Validation(_)));
        let app: AppError = LedgerError::OwnerNotFound(OwnerId::new()).into();
        assert!(matches!(app, AppError::NotFound(_)));
        let app: AppError = LedgerError::Conflict.into();
        assert!(matches!(app, AppError::Conflict(_)));
        let app: AppError = LedgerError::SameOwner(OwnerId::new()).into();
        assert!(matches!(app, AppError::BusinessRule(_)));
    }
}

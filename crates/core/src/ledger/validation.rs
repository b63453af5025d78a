//! Business rule validation for posting.
//!
//! Every rule here runs before any write. The posting planner calls these
//! in order and fails fast on the first violation.

use chrono::NaiveDate;

use crate::registry::{OwnerInfo, UnitInfo};

use super::error::LedgerError;
use super::types::TransactionMethod;

/// Validates and normalizes the voucher pair.
///
/// A voucher number without a voucher date is rejected. Voucher numbers are
/// stored trimmed and uppercased; a blank number counts as absent.
///
/// # Errors
///
/// Returns [`LedgerError::MissingVoucherDate`] when a number is present
/// without a date.
pub fn normalize_voucher(
    voucher_no: Option<&str>,
    voucher_date: Option<NaiveDate>,
) -> Result<Option<String>, LedgerError> {
    let normalized = voucher_no
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase);

    if normalized.is_some() && voucher_date.is_none() {
        return Err(LedgerError::MissingVoucherDate);
    }

    Ok(normalized)
}

/// Validates the required particulars text.
///
/// # Errors
///
/// Returns [`LedgerError::EmptyParticulars`] for blank text.
pub fn validate_particulars(particulars: &str) -> Result<&str, LedgerError> {
    let trimmed = particulars.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyParticulars);
    }
    Ok(trimmed)
}

/// Validates the participant owners for a transaction method.
///
/// Checks, in order: distinct owners, both ACTIVE, and the SYSTEM
/// restriction (SYSTEM may only appear as the source of a TRANSFER, which
/// is the opening path; never on a plain deposit or withdrawal).
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_participants(
    from: &OwnerInfo,
    to: &OwnerInfo,
    method: TransactionMethod,
) -> Result<(), LedgerError> {
    if from.id == to.id {
        return Err(LedgerError::SameOwner(from.id));
    }
    if !from.status.allows_posting() {
        return Err(LedgerError::OwnerInactive {
            id: from.id,
            status: from.status,
        });
    }
    if !to.status.allows_posting() {
        return Err(LedgerError::OwnerInactive {
            id: to.id,
            status: to.status,
        });
    }

    match method {
        TransactionMethod::Deposit | TransactionMethod::Withdrawal => {
            if from.is_system {
                return Err(LedgerError::SystemOwnerRestricted(from.id));
            }
            if to.is_system {
                return Err(LedgerError::SystemOwnerRestricted(to.id));
            }
        }
        TransactionMethod::Transfer => {
            if !from.is_system {
                return Err(LedgerError::OpeningSourceNotSystem(from.id));
            }
        }
    }

    Ok(())
}

/// Validates a unit attached to a transaction.
///
/// The unit must belong to the receiving owner and be ACTIVE.
///
/// # Errors
///
/// Returns [`LedgerError::UnitOwnershipMismatch`] or
/// [`LedgerError::UnitInactive`].
pub fn validate_unit(unit: &UnitInfo, to: &OwnerInfo) -> Result<(), LedgerError> {
    if unit.owner_id != to.id {
        return Err(LedgerError::UnitOwnershipMismatch {
            unit_id: unit.id,
            owner_id: to.id,
        });
    }
    if !unit.status.allows_posting() {
        return Err(LedgerError::UnitInactive(unit.id));
    }
    Ok(())
}

/// Validates the opening-specific preconditions of a TRANSFER.
///
/// The target must be a CLIENT or COMPANY, and the target stream (owner
/// general ledger, or the unit's ledger when one is attached) must have no
/// prior entries: opening balances seed fresh streams only.
///
/// # Errors
///
/// Returns [`LedgerError::OpeningTargetInvalid`] or
/// [`LedgerError::OpeningBalanceExists`].
pub fn validate_opening(
    to: &OwnerInfo,
    unit: Option<&UnitInfo>,
    target_stream_has_entries: bool,
) -> Result<(), LedgerError> {
    if !to.owner_type.accepts_opening_balance() {
        return Err(LedgerError::OpeningTargetInvalid(to.id));
    }
    if target_stream_has_entries {
        return Err(LedgerError::OpeningBalanceExists {
            owner_id: to.id,
            unit_id: unit.map(|u| u.id),
        });
    }
    Ok(())
}

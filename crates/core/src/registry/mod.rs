//! Account registry rules for owners and units.
//!
//! The registry gates which accounts may participate in new postings and
//! protects the records whose mutation would corrupt existing ledger
//! streams: the singleton SYSTEM owner and the owner binding of a unit that
//! already has entries.

mod owner;
mod unit;

pub use owner::{OwnerInfo, OwnerStatus, OwnerType};
pub use unit::{UnitInfo, UnitStatus};

use crate::ledger::error::LedgerError;

/// Validates that an owner record may be modified or removed.
///
/// The SYSTEM owner is seeded once and is immutable: it anchors every
/// opening transaction ever posted.
///
/// # Errors
///
/// Returns [`LedgerError::SystemOwnerProtected`] for the SYSTEM owner.
pub fn validate_owner_editable(owner: &OwnerInfo) -> Result<(), LedgerError> {
    if owner.is_system {
        return Err(LedgerError::SystemOwnerProtected(owner.id));
    }
    Ok(())
}

/// Validates that a unit's owner binding may change.
///
/// Once ledger entries exist against a unit, re-homing it would splice its
/// balance stream into another owner's ledger.
///
/// # Errors
///
/// Returns [`LedgerError::UnitOwnerImmutable`] if entries exist.
pub fn validate_unit_owner_change(
    unit: &UnitInfo,
    has_ledger_entries: bool,
) -> Result<(), LedgerError> {
    if has_ledger_entries {
        return Err(LedgerError::UnitOwnerImmutable(unit.id));
    }
    Ok(())
}

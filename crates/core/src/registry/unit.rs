//! Unit sub-account types.

use serde::{Deserialize, Serialize};

use custodia_shared::types::{OwnerId, UnitId};

/// Lifecycle status of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitStatus {
    /// Unit is open for postings.
    Active,
    /// Unit has been retired; no new postings.
    Inactive,
    /// Unit is temporarily frozen; no new postings.
    Suspended,
}

impl UnitStatus {
    /// Returns true if the unit may be attached to new transactions.
    #[must_use]
    pub const fn allows_posting(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// The unit facts the posting engine needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitInfo {
    /// The unit ID.
    pub id: UnitId,
    /// The CLIENT/COMPANY owner holding this unit.
    pub owner_id: OwnerId,
    /// Display name, prefixed onto ledger particulars.
    pub unit_name: String,
    /// Lifecycle status gating posting eligibility.
    pub status: UnitStatus,
}

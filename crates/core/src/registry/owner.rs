//! Owner account types and posting-eligibility rules.

use serde::{Deserialize, Serialize};

use custodia_shared::types::OwnerId;

use crate::ledger::polarity::AccountClass;

/// The role an owner account plays in the trust model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OwnerType {
    /// The operating trust account holding pooled funds.
    Main,
    /// A client whose money is held in trust.
    Client,
    /// A company whose money is held in trust.
    Company,
    /// The seeded counterparty for opening balances.
    System,
}

impl OwnerType {
    /// Returns the accounting class driving debit/credit polarity.
    ///
    /// MAIN and SYSTEM are asset-like; CLIENT and COMPANY are
    /// liability-like (money the trust owes back).
    #[must_use]
    pub const fn account_class(self) -> AccountClass {
        match self {
            Self::Main | Self::System => AccountClass::Asset,
            Self::Client | Self::Company => AccountClass::Liability,
        }
    }

    /// Returns true for the types an opening balance may target.
    #[must_use]
    pub const fn accepts_opening_balance(self) -> bool {
        matches!(self, Self::Client | Self::Company)
    }
}

impl std::fmt::Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Main => "MAIN",
            Self::Client => "CLIENT",
            Self::Company => "COMPANY",
            Self::System => "SYSTEM",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle status of an owner account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OwnerStatus {
    /// Account is open for postings.
    Active,
    /// Account has been retired; no new postings.
    Inactive,
    /// Account is temporarily frozen; no new postings.
    Suspended,
}

impl OwnerStatus {
    /// Returns true if the account may participate in new transactions.
    #[must_use]
    pub const fn allows_posting(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        };
        write!(f, "{s}")
    }
}

/// The owner facts the posting engine needs.
///
/// Repositories load these from the store; the engine never queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInfo {
    /// The owner ID.
    pub id: OwnerId,
    /// The owner's role in the trust model.
    pub owner_type: OwnerType,
    /// Lifecycle status gating posting eligibility.
    pub status: OwnerStatus,
    /// Display name, used for statement counterparty columns.
    pub name: String,
    /// True only for the seeded SYSTEM owner.
    pub is_system: bool,
}

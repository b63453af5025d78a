//! Statement reconstruction: display mapping and opening balance.
//!
//! The inverse of posting. Stored (debit, credit) columns map back into the
//! user-facing (deposit, withdrawal) columns through the same polarity rule
//! used at posting time, and the opening balance is derived from the
//! chronologically earliest entry of the stream so it is identical for any
//! requested sort order.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use custodia_shared::types::{LedgerEntryId, OwnerId, TransactionId, TransferGroupId, UnitId};

use crate::registry::OwnerType;

use super::polarity::AccountClass;

/// Requested display order of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recent entries first.
    #[default]
    Newest,
    /// Chronological order.
    Oldest,
}

/// User-facing movement columns of a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAmounts {
    /// Money in, from the account holder's point of view.
    pub deposit: Decimal,
    /// Money out, from the account holder's point of view.
    pub withdrawal: Decimal,
}

/// Maps stored (debit, credit) columns into display columns.
///
/// Asset streams show deposits in the debit column; liability streams show
/// deposits in the credit column. Must stay the exact inverse of the
/// posting polarity.
#[must_use]
pub const fn display_amounts(class: AccountClass, debit: Decimal, credit: Decimal) -> DisplayAmounts {
    match class {
        AccountClass::Asset => DisplayAmounts {
            deposit: debit,
            withdrawal: credit,
        },
        AccountClass::Liability => DisplayAmounts {
            deposit: credit,
            withdrawal: debit,
        },
    }
}

/// The facts about a stream's chronologically earliest entry needed to
/// derive the opening balance.
#[derive(Debug, Clone, Copy)]
pub struct EarliestEntry {
    /// True if the entry's transaction is an opening (TRANSFER from the
    /// SYSTEM owner).
    pub is_opening: bool,
    /// Debit column of the entry.
    pub debit: Decimal,
    /// Credit column of the entry.
    pub credit: Decimal,
    /// Running balance after the entry.
    pub running_balance: Decimal,
}

/// Derives the opening balance of a stream from its earliest entry.
///
/// If the stream starts with an opening transaction, the opening balance IS
/// the seeded amount (the debit for asset streams, the credit for liability
/// streams). Otherwise the balance before the entry is backed out of its
/// running balance: asset `rb - debit + credit`, liability
/// `rb - credit + debit`. A stream with no entries opens at zero.
#[must_use]
pub fn opening_balance(class: AccountClass, earliest: Option<EarliestEntry>) -> Decimal {
    let Some(entry) = earliest else {
        return Decimal::ZERO;
    };

    if entry.is_opening {
        return match class {
            AccountClass::Asset => entry.debit,
            AccountClass::Liability => entry.credit,
        };
    }

    match class {
        AccountClass::Asset => entry.running_balance - entry.debit + entry.credit,
        AccountClass::Liability => entry.running_balance - entry.credit + entry.debit,
    }
}

/// One row of a rendered statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    /// The ledger entry ID.
    pub entry_id: LedgerEntryId,
    /// The transaction that produced the entry.
    pub transaction_id: TransactionId,
    /// Entry creation time; part of the stream ordering key.
    pub created_at: DateTime<Utc>,
    /// Voucher number or the placeholder.
    pub voucher_no: String,
    /// Voucher date when the transaction carried one.
    pub voucher_date: Option<NaiveDate>,
    /// Instrument numbers inherited from the transaction.
    pub instrument_no: Option<String>,
    /// The other owner on the transaction.
    pub counterparty_id: Option<OwnerId>,
    /// Display name of the other owner.
    pub counterparty_name: String,
    /// Type of the other owner.
    pub counterparty_type: Option<OwnerType>,
    /// Description, unit-prefixed when the transaction carried a unit.
    pub particulars: String,
    /// User-facing movement columns.
    pub amounts: DisplayAmounts,
    /// The stream balance after this entry.
    pub running_balance: Decimal,
    /// Unit stream key; None is the general ledger.
    pub unit_id: Option<UnitId>,
    /// Grouping key linking the legs of a multi-leg transfer.
    pub transfer_group_id: Option<TransferGroupId>,
    /// Free-text reference to the funding source.
    pub fund_reference: Option<String>,
    /// Person responsible for the movement.
    pub person_in_charge: Option<String>,
}

/// A reconstructed account statement for one ledger stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    /// Rows in the requested sort order.
    pub rows: Vec<StatementRow>,
    /// Balance of the stream before its earliest entry; independent of the
    /// requested sort order.
    pub opening_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_mapping_asset() {
        let amounts = display_amounts(AccountClass::Asset, dec!(250.00), dec!(0));
        assert_eq!(amounts.deposit, dec!(250.00));
        assert_eq!(amounts.withdrawal, dec!(0));
    }

    #[test]
    fn test_display_mapping_liability() {
        let amounts = display_amounts(AccountClass::Liability, dec!(100.00), dec!(0));
        assert_eq!(amounts.deposit, dec!(0));
        assert_eq!(amounts.withdrawal, dec!(100.00));
    }

    #[test]
    fn test_opening_balance_empty_stream() {
        assert_eq!(opening_balance(AccountClass::Asset, None), dec!(0));
    }

    #[test]
    fn test_opening_balance_from_opening_transaction() {
        // CLIENT stream seeded by an opening of 5000: the credit IS the
        // opening balance.
        let earliest = EarliestEntry {
            is_opening: true,
            debit: dec!(0),
            credit: dec!(5000.00),
            running_balance: dec!(5000.00),
        };
        assert_eq!(
            opening_balance(AccountClass::Liability, Some(earliest)),
            dec!(5000.00)
        );

        // SYSTEM stream: the debit is the seeded amount.
        let earliest = EarliestEntry {
            is_opening: true,
            debit: dec!(5000.00),
            credit: dec!(0),
            running_balance: dec!(17000.00),
        };
        assert_eq!(
            opening_balance(AccountClass::Asset, Some(earliest)),
            dec!(5000.00)
        );
    }

    #[test]
    fn test_opening_balance_backed_out() {
        // Asset stream whose first visible entry is a plain deposit of 250
        // landing at 1250: the balance before it was 1000.
        let earliest = EarliestEntry {
            is_opening: false,
            debit: dec!(250.00),
            credit: dec!(0),
            running_balance: dec!(1250.00),
        };
        assert_eq!(
            opening_balance(AccountClass::Asset, Some(earliest)),
            dec!(1000.00)
        );

        // Liability stream whose first entry is a withdrawal (debit) of 100
        // landing at 400: the balance before it was 500.
        let earliest = EarliestEntry {
            is_opening: false,
            debit: dec!(100.00),
            credit: dec!(0),
            running_balance: dec!(400.00),
        };
        assert_eq!(
            opening_balance(AccountClass::Liability, Some(earliest)),
            dec!(500.00)
        );
    }
}

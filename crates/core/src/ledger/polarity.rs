//! The debit/credit polarity rule.
//!
//! This is the single place the trust-account polarity exists. The posting
//! engine and the statement display mapping both consume it; no other code
//! may branch on owner type to decide debit vs credit.
//!
//! Trust model, not a zero-sum transfer: a deposit increases BOTH
//! participant balances and a withdrawal decreases both. What differs per
//! account class is only which column records the movement:
//!
//! - Asset (MAIN, SYSTEM): deposit = debit, withdrawal = credit
//! - Liability (CLIENT, COMPANY): deposit = credit, withdrawal = debit

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accounting class of an owner account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
    /// Debit-normal: balance increases on debit (MAIN, SYSTEM).
    Asset,
    /// Credit-normal: balance increases on credit (CLIENT, COMPANY).
    Liability,
}

/// Direction of a business movement, applied identically to both legs.
///
/// Opening transactions move as [`Movement::Deposit`] on both legs: seeding
/// a balance is money entering the trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    /// Money entering the trust; both balances increase.
    Deposit,
    /// Money leaving the trust; both balances decrease.
    Withdrawal,
}

/// Which ledger column records an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Amount lands in the debit column.
    Debit,
    /// Amount lands in the credit column.
    Credit,
}

/// Resolved polarity: the column an amount lands in and the sign of its
/// effect on the running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polarity {
    /// Ledger column for the amount.
    pub side: EntrySide,
    /// True if the running balance increases, false if it decreases.
    pub increases: bool,
}

impl Polarity {
    /// Splits an amount into its (debit, credit) columns.
    #[must_use]
    pub fn columns(self, amount: Decimal) -> (Decimal, Decimal) {
        match self.side {
            EntrySide::Debit => (amount, Decimal::ZERO),
            EntrySide::Credit => (Decimal::ZERO, amount),
        }
    }

    /// Applies the movement to a prior balance.
    #[must_use]
    pub fn apply(self, prior_balance: Decimal, amount: Decimal) -> Decimal {
        if self.increases {
            prior_balance + amount
        } else {
            prior_balance - amount
        }
    }

    /// The signed balance change for an amount.
    #[must_use]
    pub fn signed_change(self, amount: Decimal) -> Decimal {
        if self.increases { amount } else { -amount }
    }
}

/// Resolves the polarity for an account class and movement direction.
#[must_use]
pub const fn polarity(class: AccountClass, movement: Movement) -> Polarity {
    match (class, movement) {
        (AccountClass::Asset, Movement::Deposit) => Polarity {
            side: EntrySide::Debit,
            increases: true,
        },
        (AccountClass::Asset, Movement::Withdrawal) => Polarity {
            side: EntrySide::Credit,
            increases: false,
        },
        (AccountClass::Liability, Movement::Deposit) => Polarity {
            side: EntrySide::Credit,
            increases: true,
        },
        (AccountClass::Liability, Movement::Withdrawal) => Polarity {
            side: EntrySide::Debit,
            increases: false,
        },
    }
}

/// Recovers the signed balance change of a stored entry.
///
/// Inverse of posting: given the (debit, credit) columns of an entry on a
/// stream of the given class, returns the change it applied to the running
/// balance. Asset streams move by `debit - credit`, liability streams by
/// `credit - debit`.
#[must_use]
pub fn balance_change(class: AccountClass, debit: Decimal, credit: Decimal) -> Decimal {
    match class {
        AccountClass::Asset => debit - credit,
        AccountClass::Liability => credit - debit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_asset_deposit_is_debit_increase() {
        let p = polarity(AccountClass::Asset, Movement::Deposit);
        assert_eq!(p.side, EntrySide::Debit);
        assert_eq!(p.apply(dec!(1000.00), dec!(250.00)), dec!(1250.00));
        assert_eq!(p.columns(dec!(250.00)), (dec!(250.00), dec!(0)));
    }

    #[test]
    fn test_asset_withdrawal_is_credit_decrease() {
        let p = polarity(AccountClass::Asset, Movement::Withdrawal);
        assert_eq!(p.side, EntrySide::Credit);
        assert_eq!(p.apply(dec!(1000.00), dec!(100.00)), dec!(900.00));
    }

    #[test]
    fn test_liability_deposit_is_credit_increase() {
        let p = polarity(AccountClass::Liability, Movement::Deposit);
        assert_eq!(p.side, EntrySide::Credit);
        assert_eq!(p.apply(dec!(500.00), dec!(250.00)), dec!(750.00));
    }

    #[test]
    fn test_liability_withdrawal_is_debit_decrease() {
        let p = polarity(AccountClass::Liability, Movement::Withdrawal);
        assert_eq!(p.side, EntrySide::Debit);
        assert_eq!(p.apply(dec!(500.00), dec!(100.00)), dec!(400.00));
    }

    #[test]
    fn test_deposit_increases_both_classes() {
        for class in [AccountClass::Asset, AccountClass::Liability] {
            assert!(polarity(class, Movement::Deposit).increases);
            assert!(!polarity(class, Movement::Withdrawal).increases);
        }
    }

    #[test]
    fn test_balance_change_inverts_columns() {
        // Asset: debit increases, credit decreases
        assert_eq!(
            balance_change(AccountClass::Asset, dec!(100), dec!(0)),
            dec!(100)
        );
        assert_eq!(
            balance_change(AccountClass::Asset, dec!(0), dec!(40)),
            dec!(-40)
        );
        // Liability: credit increases, debit decreases
        assert_eq!(
            balance_change(AccountClass::Liability, dec!(0), dec!(100)),
            dec!(100)
        );
        assert_eq!(
            balance_change(AccountClass::Liability, dec!(40), dec!(0)),
            dec!(-40)
        );
    }

    #[test]
    fn test_signed_change_matches_apply() {
        let p = polarity(AccountClass::Liability, Movement::Withdrawal);
        assert_eq!(p.signed_change(dec!(25.00)), dec!(-25.00));
        assert_eq!(
            p.apply(dec!(100.00), dec!(25.00)),
            dec!(100.00) + p.signed_change(dec!(25.00))
        );
    }
}

//! Ledger domain types for transactions.

use serde::{Deserialize, Serialize};

use super::polarity::Movement;

/// Placeholder written to ledger rows when a transaction has no voucher.
pub const VOUCHER_PLACEHOLDER: &str = "—";

/// How money moved: the business method of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionMethod {
    /// Money entering the trust.
    Deposit,
    /// Money leaving the trust.
    Withdrawal,
    /// A SYSTEM-originated transfer; used for opening balances.
    Transfer,
}

impl TransactionMethod {
    /// The movement direction applied to both legs of the posting.
    ///
    /// Transfers (openings) post as deposits: the seeded balance enters
    /// the trust on both sides.
    #[must_use]
    pub const fn movement(self) -> Movement {
        match self {
            Self::Deposit | Self::Transfer => Movement::Deposit,
            Self::Withdrawal => Movement::Withdrawal,
        }
    }
}

impl std::fmt::Display for TransactionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdrawal => "WITHDRAWAL",
            Self::Transfer => "TRANSFER",
        };
        write!(f, "{s}")
    }
}

/// The instrument category of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Paid by cheque.
    Cheque,
    /// Recorded from a deposit slip.
    DepositSlip,
    /// Cash deposited over the counter.
    CashDeposit,
    /// A cheque deposited into the trust.
    ChequeDeposit,
    /// Bank-to-bank transfer.
    BankTransfer,
    /// Opening balance seed.
    Opening,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_of_methods() {
        assert_eq!(TransactionMethod::Deposit.movement(), Movement::Deposit);
        assert_eq!(TransactionMethod::Transfer.movement(), Movement::Deposit);
        assert_eq!(
            TransactionMethod::Withdrawal.movement(),
            Movement::Withdrawal
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(TransactionMethod::Deposit.to_string(), "DEPOSIT");
        assert_eq!(TransactionMethod::Withdrawal.to_string(), "WITHDRAWAL");
        assert_eq!(TransactionMethod::Transfer.to_string(), "TRANSFER");
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&TransactionKind::DepositSlip).unwrap();
        assert_eq!(json, "\"DEPOSIT_SLIP\"");
        let json = serde_json::to_string(&TransactionMethod::Deposit).unwrap();
        assert_eq!(json, "\"DEPOSIT\"");
    }
}

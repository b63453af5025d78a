//! Database enum definitions mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The role an owner account plays in the trust model.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "owner_type")]
pub enum OwnerType {
    /// The operating trust account.
    #[sea_orm(string_value = "MAIN")]
    Main,
    /// A client beneficiary.
    #[sea_orm(string_value = "CLIENT")]
    Client,
    /// A company beneficiary.
    #[sea_orm(string_value = "COMPANY")]
    Company,
    /// The seeded opening-balance counterparty.
    #[sea_orm(string_value = "SYSTEM")]
    System,
}

/// Lifecycle status of an owner account.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "owner_status")]
pub enum OwnerStatus {
    /// Open for postings.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Retired; no new postings.
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    /// Temporarily frozen; no new postings.
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

/// Lifecycle status of a unit.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "unit_status")]
pub enum UnitStatus {
    /// Open for postings.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Retired; no new postings.
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    /// Temporarily frozen; no new postings.
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
}

/// Business method of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_method")]
pub enum TransactionMethod {
    /// Money entering the trust.
    #[sea_orm(string_value = "DEPOSIT")]
    Deposit,
    /// Money leaving the trust.
    #[sea_orm(string_value = "WITHDRAWAL")]
    Withdrawal,
    /// SYSTEM-originated transfer; the opening-balance path.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
}

/// Instrument category of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
pub enum TransactionKind {
    /// Paid by cheque.
    #[sea_orm(string_value = "CHEQUE")]
    Cheque,
    /// Recorded from a deposit slip.
    #[sea_orm(string_value = "DEPOSIT_SLIP")]
    DepositSlip,
    /// Cash deposited over the counter.
    #[sea_orm(string_value = "CASH_DEPOSIT")]
    CashDeposit,
    /// A cheque deposited into the trust.
    #[sea_orm(string_value = "CHEQUE_DEPOSIT")]
    ChequeDeposit,
    /// Bank-to-bank transfer.
    #[sea_orm(string_value = "BANK_TRANSFER")]
    BankTransfer,
    /// Opening balance seed.
    #[sea_orm(string_value = "OPENING")]
    Opening,
}

// Conversions between the database enums and the core domain enums. The
// core crate stays free of SeaORM; repositories translate at the boundary.

impl From<OwnerType> for custodia_core::registry::OwnerType {
    fn from(value: OwnerType) -> Self {
        match value {
            OwnerType::Main => Self::Main,
            OwnerType::Client => Self::Client,
            OwnerType::Company => Self::Company,
            OwnerType::System => Self::System,
        }
    }
}

impl From<custodia_core::registry::OwnerType> for OwnerType {
    fn from(value: custodia_core::registry::OwnerType) -> Self {
        match value {
            custodia_core::registry::OwnerType::Main => Self::Main,
            custodia_core::registry::OwnerType::Client => Self::Client,
            custodia_core::registry::OwnerType::Company => Self::Company,
            custodia_core::registry::OwnerType::System => Self::System,
        }
    }
}

impl From<OwnerStatus> for custodia_core::registry::OwnerStatus {
    fn from(value: OwnerStatus) -> Self {
        match value {
            OwnerStatus::Active => Self::Active,
            OwnerStatus::Inactive => Self::Inactive,
            OwnerStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<custodia_core::registry::OwnerStatus> for OwnerStatus {
    fn from(value: custodia_core::registry::OwnerStatus) -> Self {
        match value {
            custodia_core::registry::OwnerStatus::Active => Self::Active,
            custodia_core::registry::OwnerStatus::Inactive => Self::Inactive,
            custodia_core::registry::OwnerStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<UnitStatus> for custodia_core::registry::UnitStatus {
    fn from(value: UnitStatus) -> Self {
        match value {
            UnitStatus::Active => Self::Active,
            UnitStatus::Inactive => Self::Inactive,
            UnitStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<custodia_core::registry::UnitStatus> for UnitStatus {
    fn from(value: custodia_core::registry::UnitStatus) -> Self {
        match value {
            custodia_core::registry::UnitStatus::Active => Self::Active,
            custodia_core::registry::UnitStatus::Inactive => Self::Inactive,
            custodia_core::registry::UnitStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<TransactionMethod> for custodia_core::ledger::TransactionMethod {
    fn from(value: TransactionMethod) -> Self {
        match value {
            TransactionMethod::Deposit => Self::Deposit,
            TransactionMethod::Withdrawal => Self::Withdrawal,
            TransactionMethod::Transfer => Self::Transfer,
        }
    }
}

impl From<custodia_core::ledger::TransactionMethod> for TransactionMethod {
    fn from(value: custodia_core::ledger::TransactionMethod) -> Self {
        match value {
            custodia_core::ledger::TransactionMethod::Deposit => Self::Deposit,
            custodia_core::ledger::TransactionMethod::Withdrawal => Self::Withdrawal,
            custodia_core::ledger::TransactionMethod::Transfer => Self::Transfer,
        }
    }
}

impl From<TransactionKind> for custodia_core::ledger::TransactionKind {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::Cheque => Self::Cheque,
            TransactionKind::DepositSlip => Self::DepositSlip,
            TransactionKind::CashDeposit => Self::CashDeposit,
            TransactionKind::ChequeDeposit => Self::ChequeDeposit,
            TransactionKind::BankTransfer => Self::BankTransfer,
            TransactionKind::Opening => Self::Opening,
        }
    }
}

impl From<custodia_core::ledger::TransactionKind> for TransactionKind {
    fn from(value: custodia_core::ledger::TransactionKind) -> Self {
        match value {
            custodia_core::ledger::TransactionKind::Cheque => Self::Cheque,
            custodia_core::ledger::TransactionKind::DepositSlip => Self::DepositSlip,
            custodia_core::ledger::TransactionKind::CashDeposit => Self::CashDeposit,
            custodia_core::ledger::TransactionKind::ChequeDeposit => Self::ChequeDeposit,
            custodia_core::ledger::TransactionKind::BankTransfer => Self::BankTransfer,
            custodia_core::ledger::TransactionKind::Opening => Self::Opening,
        }
    }
}

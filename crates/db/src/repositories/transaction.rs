//! Transaction repository for transaction record operations.
//!
//! Transactions are created unposted; the [`LedgerRepository`] writes their
//! ledger entries and marks them posted. Posted transactions are immutable:
//! update and delete are rejected here.
//!
//! [`LedgerRepository`]: super::LedgerRepository

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use custodia_core::ledger::{
    LedgerError, TransactionKind, TransactionMethod, validation,
};
use custodia_core::registry::{OwnerInfo, UnitInfo};
use custodia_shared::types::{Amount, TransactionId};

use crate::entities::{owner_ledger_entries, transactions};

use super::{OwnerRepository, UnitRepository, map_db_err};

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Business method.
    pub method: TransactionMethod,
    /// Instrument category.
    pub kind: TransactionKind,
    /// The paying side.
    pub from_owner_id: Uuid,
    /// The receiving side.
    pub to_owner_id: Uuid,
    /// Optional unit of the receiving owner.
    pub unit_id: Option<Uuid>,
    /// Amount; validated against the posting bounds.
    pub amount: Decimal,
    /// Raw voucher number as entered.
    pub voucher_no: Option<String>,
    /// Voucher date; required when a voucher number is present.
    pub voucher_date: Option<NaiveDate>,
    /// Comma-joined instrument numbers from the instrument module.
    pub instrument_no: Option<String>,
    /// Free-text reference to the funding source.
    pub fund_reference: Option<String>,
    /// Required description of the movement.
    pub particulars: String,
    /// Grouping key linking the legs of a multi-leg transfer.
    pub transfer_group_id: Option<Uuid>,
    /// Person responsible for the movement.
    pub person_in_charge: Option<String>,
    /// The user creating the transaction.
    pub created_by: Option<Uuid>,
}

/// Input for updating an unposted transaction. `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New description.
    pub particulars: Option<String>,
    /// New fund reference.
    pub fund_reference: Option<String>,
    /// New person in charge.
    pub person_in_charge: Option<String>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by business method.
    pub method: Option<TransactionMethod>,
    /// Filter by posted flag.
    pub is_posted: Option<bool>,
    /// Filter by participation of an owner, on either side.
    pub owner_id: Option<Uuid>,
    /// Filter by creation date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by creation date range end.
    pub date_to: Option<NaiveDate>,
}

/// A transaction with its ledger entries.
#[derive(Debug, Clone)]
pub struct TransactionWithEntries {
    /// Transaction record.
    pub transaction: transactions::Model,
    /// Its ledger entries; empty while unposted.
    pub entries: Vec<owner_ledger_entries::Model>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an unposted transaction.
    ///
    /// Runs the same pure validation the posting engine applies (amount
    /// bounds, voucher pair, participants, unit ownership) so malformed
    /// records never reach the ledger, plus the voucher uniqueness check.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, LedgerError> {
        let amount = Amount::new(input.amount)?;
        validation::validate_particulars(&input.particulars)?;
        let voucher_no =
            validation::normalize_voucher(input.voucher_no.as_deref(), input.voucher_date)?;

        let owner_repo = OwnerRepository::new(self.db.clone());
        let from = OwnerInfo::from(&owner_repo.get(input.from_owner_id).await?);
        let to = OwnerInfo::from(&owner_repo.get(input.to_owner_id).await?);
        validation::validate_participants(&from, &to, input.method)?;

        if let Some(unit_id) = input.unit_id {
            let unit = UnitRepository::new(self.db.clone()).get(unit_id).await?;
            validation::validate_unit(&UnitInfo::from(&unit), &to)?;
        }

        if let Some(ref voucher_no) = voucher_no {
            let existing = transactions::Entity::find()
                .filter(transactions::Column::VoucherNo.eq(voucher_no.clone()))
                .one(&self.db)
                .await
                .map_err(map_db_err)?;
            if existing.is_some() {
                return Err(LedgerError::DuplicateVoucher(voucher_no.clone()));
            }
        }

        let now = Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            voucher_no: Set(voucher_no),
            voucher_date: Set(input.voucher_date),
            trans_method: Set(input.method.into()),
            trans_kind: Set(input.kind.into()),
            from_owner_id: Set(input.from_owner_id),
            to_owner_id: Set(input.to_owner_id),
            unit_id: Set(input.unit_id),
            amount: Set(amount.into_inner()),
            instrument_no: Set(input.instrument_no),
            fund_reference: Set(input.fund_reference),
            particulars: Set(input.particulars.trim().to_string()),
            transfer_group_id: Set(input.transfer_group_id),
            person_in_charge: Set(input.person_in_charge),
            is_posted: Set(false),
            posted_at: Set(None),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        transaction.insert(&self.db).await.map_err(map_db_err)
    }

    /// Gets a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if no record exists.
    pub async fn get(&self, id: Uuid) -> Result<transactions::Model, LedgerError> {
        transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| LedgerError::TransactionNotFound(TransactionId::from_uuid(id)))
    }

    /// Gets a transaction with its ledger entries.
    pub async fn get_with_entries(&self, id: Uuid) -> Result<TransactionWithEntries, LedgerError> {
        let transaction = self.get(id).await?;

        let entries = owner_ledger_entries::Entity::find()
            .filter(owner_ledger_entries::Column::TransactionId.eq(id))
            .order_by_asc(owner_ledger_entries::Column::CreatedAt)
            .order_by_asc(owner_ledger_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(TransactionWithEntries {
            transaction,
            entries,
        })
    }

    /// Lists transactions with optional filters, newest first.
    pub async fn list(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<transactions::Model>, LedgerError> {
        let mut query = transactions::Entity::find();

        if let Some(method) = filter.method {
            let method: crate::entities::sea_orm_active_enums::TransactionMethod = method.into();
            query = query.filter(transactions::Column::TransMethod.eq(method));
        }
        if let Some(is_posted) = filter.is_posted {
            query = query.filter(transactions::Column::IsPosted.eq(is_posted));
        }
        if let Some(owner_id) = filter.owner_id {
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::FromOwnerId.eq(owner_id))
                    .add(transactions::Column::ToOwnerId.eq(owner_id)),
            );
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::VoucherDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::VoucherDate.lte(date_to));
        }

        query
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    /// Updates an unposted transaction's descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionPosted`] once entries exist.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, LedgerError> {
        let transaction = self.get(id).await?;
        if transaction.is_posted {
            return Err(LedgerError::TransactionPosted(TransactionId::from_uuid(id)));
        }

        let mut active: transactions::ActiveModel = transaction.into();
        if let Some(particulars) = input.particulars {
            validation::validate_particulars(&particulars)?;
            active.particulars = Set(particulars.trim().to_string());
        }
        if let Some(fund_reference) = input.fund_reference {
            active.fund_reference = Set(Some(fund_reference));
        }
        if let Some(person_in_charge) = input.person_in_charge {
            active.person_in_charge = Set(Some(person_in_charge));
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(map_db_err)
    }

    /// Deletes an unposted transaction.
    ///
    /// Posted transactions are part of the audit trail and cannot be
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionPosted`] once entries exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), LedgerError> {
        let transaction = self.get(id).await?;
        if transaction.is_posted {
            return Err(LedgerError::TransactionPosted(TransactionId::from_uuid(id)));
        }

        transactions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

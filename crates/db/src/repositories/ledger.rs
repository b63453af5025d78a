//! The persistence half of the ledger posting engine, plus statements.
//!
//! Posting is a short read-then-write sequence that must be linearizable
//! per `(owner_id, unit_id)` stream: read the latest running balance,
//! compute, insert two rows, mark the transaction posted. The whole
//! sequence runs inside one database transaction with the participant
//! owner rows locked (`SELECT ... FOR UPDATE`, id order), so concurrent
//! postings against the same account serialize instead of reading a stale
//! previous balance. An unprotected read-then-insert here would silently
//! lose one side's effect.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use custodia_core::ledger::{
    EarliestEntry, EntryPlan, LedgerError, PostingRequest, PriorBalances, SortOrder, Statement,
    StatementRow, TransactionMethod, display_amounts, opening_balance, plan_entries,
};
use custodia_core::registry::{OwnerInfo, UnitInfo};
use custodia_shared::types::{
    Amount, LedgerEntryId, OwnerId, TransactionId, TransferGroupId, UnitId,
};

use crate::entities::{owner_ledger_entries, owners, transactions, units};

use super::map_db_err;

/// Default number of retries after a serialization conflict.
const DEFAULT_POSTING_RETRIES: u32 = 1;

/// Ledger repository: posting and statement reconstruction.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
    posting_retries: u32,
}

impl LedgerRepository {
    /// Creates a new ledger repository with the default retry policy.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            posting_retries: DEFAULT_POSTING_RETRIES,
        }
    }

    /// Overrides how many times a posting is retried after a
    /// serialization conflict.
    #[must_use]
    pub const fn with_posting_retries(mut self, posting_retries: u32) -> Self {
        self.posting_retries = posting_retries;
        self
    }

    /// Posts a transaction: validates, computes both entry plans, writes
    /// the two ledger rows, and marks the transaction posted, atomically.
    ///
    /// `unit_ledger` scopes the to-side entry to the transaction's unit
    /// stream instead of the owner's general stream; openings that carry a
    /// unit are always unit-scoped. The from-side entry is always general.
    ///
    /// Callers must invoke this exactly once per transaction; the engine
    /// does not deduplicate.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition without writing anything,
    /// or the retryable [`LedgerError::Conflict`] after losing a
    /// serialization race more than `posting_retries` times.
    #[instrument(skip(self))]
    pub async fn post(
        &self,
        transaction_id: Uuid,
        unit_ledger: bool,
    ) -> Result<(owner_ledger_entries::Model, owner_ledger_entries::Model), LedgerError> {
        let mut attempt = 0;
        loop {
            match self.try_post(transaction_id, unit_ledger).await {
                Err(LedgerError::Conflict) if attempt < self.posting_retries => {
                    attempt += 1;
                    warn!(attempt, "posting hit a serialization conflict, retrying");
                }
                Ok(entries) => {
                    debug!("transaction posted");
                    return Ok(entries);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One posting attempt inside a fresh database transaction.
    async fn try_post(
        &self,
        transaction_id: Uuid,
        unit_ledger: bool,
    ) -> Result<(owner_ledger_entries::Model, owner_ledger_entries::Model), LedgerError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::post_in_txn(&txn, transaction_id, unit_ledger).await {
            Ok(entries) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(entries)
            }
            Err(err) => {
                // Rollback failures are unreachable state anyway; the
                // original error is the one worth surfacing.
                let _ = txn.rollback().await;
                Err(err)
            }
        }
    }

    async fn post_in_txn(
        txn: &DatabaseTransaction,
        transaction_id: Uuid,
        unit_ledger: bool,
    ) -> Result<(owner_ledger_entries::Model, owner_ledger_entries::Model), LedgerError> {
        let transaction = transactions::Entity::find_by_id(transaction_id)
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| {
                LedgerError::TransactionNotFound(TransactionId::from_uuid(transaction_id))
            })?;

        // Lock both participant owner rows in id order. This serializes
        // concurrent postings per owner, including first-ever postings
        // where there is no latest entry row to lock.
        let locked = owners::Entity::find()
            .filter(
                owners::Column::Id
                    .is_in([transaction.from_owner_id, transaction.to_owner_id]),
            )
            .order_by_asc(owners::Column::Id)
            .lock_exclusive()
            .all(txn)
            .await
            .map_err(map_db_err)?;

        let from = locked
            .iter()
            .find(|o| o.id == transaction.from_owner_id)
            .map(OwnerInfo::from)
            .ok_or_else(|| {
                LedgerError::OwnerNotFound(OwnerId::from_uuid(transaction.from_owner_id))
            })?;
        let to = locked
            .iter()
            .find(|o| o.id == transaction.to_owner_id)
            .map(OwnerInfo::from)
            .ok_or_else(|| {
                LedgerError::OwnerNotFound(OwnerId::from_uuid(transaction.to_owner_id))
            })?;

        let unit = match transaction.unit_id {
            Some(unit_id) => Some(
                units::Entity::find_by_id(unit_id)
                    .one(txn)
                    .await
                    .map_err(map_db_err)?
                    .map(|model| UnitInfo::from(&model))
                    .ok_or(LedgerError::UnitNotFound(UnitId::from_uuid(unit_id)))?,
            ),
            None => None,
        };

        let method: TransactionMethod = transaction.trans_method.clone().into();
        // Openings always track the unit they seed.
        let unit_ledger =
            unit_ledger || (matches!(method, TransactionMethod::Transfer) && unit.is_some());

        let latest_from =
            Self::latest_entry(txn, transaction.from_owner_id, None).await?;
        let to_unit_scope = if unit_ledger {
            transaction.unit_id
        } else {
            None
        };
        let latest_to =
            Self::latest_entry(txn, transaction.to_owner_id, to_unit_scope).await?;

        let priors = PriorBalances {
            from_balance: latest_from
                .as_ref()
                .map_or(rust_decimal::Decimal::ZERO, |e| e.running_balance),
            to_balance: latest_to
                .as_ref()
                .map_or(rust_decimal::Decimal::ZERO, |e| e.running_balance),
            to_stream_has_entries: latest_to.is_some(),
        };

        let request = PostingRequest {
            transaction_id: TransactionId::from_uuid(transaction.id),
            method,
            amount: Amount::new(transaction.amount)?,
            voucher_no: transaction.voucher_no.clone(),
            voucher_date: transaction.voucher_date,
            instrument_no: transaction.instrument_no.clone(),
            particulars: transaction.particulars.clone(),
            unit_ledger,
            transfer_group_id: transaction
                .transfer_group_id
                .map(TransferGroupId::from_uuid),
        };

        let (from_plan, to_plan) = plan_entries(&request, &from, &to, unit.as_ref(), priors)?;

        let now = Utc::now();
        let from_entry = Self::insert_entry(txn, &from_plan, now).await?;
        let to_entry = Self::insert_entry(txn, &to_plan, now).await?;

        let mut posted: transactions::ActiveModel = transaction.into();
        posted.is_posted = Set(true);
        posted.posted_at = Set(Some(now.into()));
        posted.updated_at = Set(now.into());
        posted.update(txn).await.map_err(map_db_err)?;

        Ok((from_entry, to_entry))
    }

    /// The most recent entry of one `(owner_id, unit_id)` stream.
    async fn latest_entry(
        txn: &DatabaseTransaction,
        owner_id: Uuid,
        unit_id: Option<Uuid>,
    ) -> Result<Option<owner_ledger_entries::Model>, LedgerError> {
        let mut query = owner_ledger_entries::Entity::find()
            .filter(owner_ledger_entries::Column::OwnerId.eq(owner_id));

        query = match unit_id {
            Some(unit_id) => query.filter(owner_ledger_entries::Column::UnitId.eq(unit_id)),
            None => query.filter(owner_ledger_entries::Column::UnitId.is_null()),
        };

        query
            .order_by_desc(owner_ledger_entries::Column::CreatedAt)
            .order_by_desc(owner_ledger_entries::Column::Id)
            .limit(1)
            .one(txn)
            .await
            .map_err(map_db_err)
    }

    async fn insert_entry(
        txn: &DatabaseTransaction,
        plan: &EntryPlan,
        now: chrono::DateTime<Utc>,
    ) -> Result<owner_ledger_entries::Model, LedgerError> {
        let entry = owner_ledger_entries::ActiveModel {
            // v7 ids are time-ordered, so the (created_at, id) tie-break
            // follows insertion order even within one timestamp tick.
            id: Set(Uuid::now_v7()),
            owner_id: Set(plan.owner_id.into_inner()),
            transaction_id: Set(plan.transaction_id.into_inner()),
            voucher_no: Set(plan.voucher_no.clone()),
            voucher_date: Set(plan.voucher_date),
            instrument_no: Set(plan.instrument_no.clone()),
            debit: Set(plan.debit),
            credit: Set(plan.credit),
            running_balance: Set(plan.running_balance),
            unit_id: Set(plan.unit_id.map(UnitId::into_inner)),
            particulars: Set(plan.particulars.clone()),
            transfer_group_id: Set(plan.transfer_group_id.map(TransferGroupId::into_inner)),
            created_at: Set(now.into()),
        };

        entry.insert(txn).await.map_err(map_db_err)
    }

    /// Reconstructs the statement of one `(owner_id, unit_id)` stream.
    ///
    /// Rows come back in the requested order, enriched with the
    /// counterparty of each transaction. The opening balance derives from
    /// the chronologically earliest entry regardless of the requested
    /// order, so ascending and descending views agree.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OwnerNotFound`] for an unknown owner.
    #[instrument(skip(self))]
    pub async fn statement(
        &self,
        owner_id: Uuid,
        unit_id: Option<Uuid>,
        order: SortOrder,
    ) -> Result<Statement, LedgerError> {
        let owner = owners::Entity::find_by_id(owner_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| LedgerError::OwnerNotFound(OwnerId::from_uuid(owner_id)))?;
        let owner_info = OwnerInfo::from(&owner);
        let class = owner_info.owner_type.account_class();

        let sql_order = match order {
            SortOrder::Newest => Order::Desc,
            SortOrder::Oldest => Order::Asc,
        };
        let mut query = owner_ledger_entries::Entity::find()
            .filter(owner_ledger_entries::Column::OwnerId.eq(owner_id));
        query = match unit_id {
            Some(unit_id) => query.filter(owner_ledger_entries::Column::UnitId.eq(unit_id)),
            None => query.filter(owner_ledger_entries::Column::UnitId.is_null()),
        };
        let entries = query
            .order_by(owner_ledger_entries::Column::CreatedAt, sql_order.clone())
            .order_by(owner_ledger_entries::Column::Id, sql_order)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let (transaction_map, participant_map) =
            self.load_counterparties(&entries).await?;

        let rows = entries
            .iter()
            .map(|entry| {
                let transaction = transaction_map.get(&entry.transaction_id);
                let counterparty = transaction.and_then(|t| {
                    let other_id = if t.from_owner_id == owner_id {
                        t.to_owner_id
                    } else {
                        t.from_owner_id
                    };
                    participant_map.get(&other_id)
                });

                StatementRow {
                    entry_id: LedgerEntryId::from_uuid(entry.id),
                    transaction_id: TransactionId::from_uuid(entry.transaction_id),
                    created_at: entry.created_at.to_utc(),
                    voucher_no: entry.voucher_no.clone(),
                    voucher_date: entry.voucher_date,
                    instrument_no: entry.instrument_no.clone(),
                    counterparty_id: counterparty.map(|o| OwnerId::from_uuid(o.id)),
                    counterparty_name: counterparty
                        .map_or_else(|| "—".to_string(), |o| o.name.clone()),
                    counterparty_type: counterparty.map(|o| o.owner_type.clone().into()),
                    particulars: entry.particulars.clone(),
                    amounts: display_amounts(class, entry.debit, entry.credit),
                    running_balance: entry.running_balance,
                    unit_id: entry.unit_id.map(UnitId::from_uuid),
                    transfer_group_id: entry.transfer_group_id.map(TransferGroupId::from_uuid),
                    fund_reference: transaction.and_then(|t| t.fund_reference.clone()),
                    person_in_charge: transaction.and_then(|t| t.person_in_charge.clone()),
                }
            })
            .collect();

        // The earliest entry is fetched independently of the requested
        // order so a descending or filtered view cannot shift the opening
        // balance.
        let earliest = self
            .earliest_entry_facts(owner_id, unit_id, &owner)
            .await?;

        Ok(Statement {
            rows,
            opening_balance: opening_balance(class, earliest),
        })
    }

    /// Loads the transactions behind a set of entries and every owner
    /// participating in them.
    async fn load_counterparties(
        &self,
        entries: &[owner_ledger_entries::Model],
    ) -> Result<
        (
            std::collections::HashMap<Uuid, transactions::Model>,
            std::collections::HashMap<Uuid, owners::Model>,
        ),
        LedgerError,
    > {
        let transaction_ids: Vec<Uuid> = entries.iter().map(|e| e.transaction_id).collect();
        let transaction_list = if transaction_ids.is_empty() {
            Vec::new()
        } else {
            transactions::Entity::find()
                .filter(transactions::Column::Id.is_in(transaction_ids))
                .all(&self.db)
                .await
                .map_err(map_db_err)?
        };

        let mut participant_ids: Vec<Uuid> = transaction_list
            .iter()
            .flat_map(|t| [t.from_owner_id, t.to_owner_id])
            .collect();
        participant_ids.sort_unstable();
        participant_ids.dedup();

        let participant_list = if participant_ids.is_empty() {
            Vec::new()
        } else {
            owners::Entity::find()
                .filter(owners::Column::Id.is_in(participant_ids))
                .all(&self.db)
                .await
                .map_err(map_db_err)?
        };

        Ok((
            transaction_list.into_iter().map(|t| (t.id, t)).collect(),
            participant_list.into_iter().map(|o| (o.id, o)).collect(),
        ))
    }

    /// Fetches the chronologically earliest entry of a stream and the
    /// facts needed to derive the opening balance from it.
    async fn earliest_entry_facts(
        &self,
        owner_id: Uuid,
        unit_id: Option<Uuid>,
        owner: &owners::Model,
    ) -> Result<Option<EarliestEntry>, LedgerError> {
        let mut query = owner_ledger_entries::Entity::find()
            .filter(owner_ledger_entries::Column::OwnerId.eq(owner_id));
        query = match unit_id {
            Some(unit_id) => query.filter(owner_ledger_entries::Column::UnitId.eq(unit_id)),
            None => query.filter(owner_ledger_entries::Column::UnitId.is_null()),
        };
        let Some(earliest) = query
            .order_by_asc(owner_ledger_entries::Column::CreatedAt)
            .order_by_asc(owner_ledger_entries::Column::Id)
            .limit(1)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let transaction = transactions::Entity::find_by_id(earliest.transaction_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        let is_opening = match &transaction {
            Some(t) => {
                let method: TransactionMethod = t.trans_method.clone().into();
                let from_is_system = if t.from_owner_id == owner.id {
                    owner.is_system
                } else {
                    owners::Entity::find_by_id(t.from_owner_id)
                        .one(&self.db)
                        .await
                        .map_err(map_db_err)?
                        .is_some_and(|o| o.is_system)
                };
                matches!(method, TransactionMethod::Transfer) && from_is_system
            }
            None => false,
        };

        Ok(Some(EarliestEntry {
            is_opening,
            debit: earliest.debit,
            credit: earliest.credit,
            running_balance: earliest.running_balance,
        }))
    }
}

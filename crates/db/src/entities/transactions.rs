//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{TransactionKind, TransactionMethod};

/// A transaction: the business event the posting engine turns into two
/// ledger entries. Created unposted; immutable once posted.
///
/// `instrument_no` holds the comma-joined instrument numbers collected by
/// the (external) instrument module at creation time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub voucher_no: Option<String>,
    pub voucher_date: Option<Date>,
    pub trans_method: TransactionMethod,
    pub trans_kind: TransactionKind,
    pub from_owner_id: Uuid,
    pub to_owner_id: Uuid,
    pub unit_id: Option<Uuid>,
    pub amount: Decimal,
    pub instrument_no: Option<String>,
    pub fund_reference: Option<String>,
    pub particulars: String,
    pub transfer_group_id: Option<Uuid>,
    pub person_in_charge: Option<String>,
    pub is_posted: bool,
    pub posted_at: Option<DateTimeWithTimeZone>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::FromOwnerId",
        to = "super::owners::Column::Id"
    )]
    FromOwner,
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::ToOwnerId",
        to = "super::owners::Column::Id"
    )]
    ToOwner,
    #[sea_orm(
        belongs_to = "super::units::Entity",
        from = "Column::UnitId",
        to = "super::units::Column::Id"
    )]
    Units,
    #[sea_orm(has_many = "super::owner_ledger_entries::Entity")]
    OwnerLedgerEntries,
}

impl Related<super::units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Units.def()
    }
}

impl Related<super::owner_ledger_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OwnerLedgerEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

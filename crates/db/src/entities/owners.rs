//! `SeaORM` Entity for the owners table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use custodia_core::registry::OwnerInfo;
use custodia_shared::types::OwnerId;

use super::sea_orm_active_enums::{OwnerStatus, OwnerType};

/// An owner account: MAIN, CLIENT, COMPANY, or the singleton SYSTEM owner.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_code: String,
    pub owner_type: OwnerType,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: OwnerStatus,
    pub is_system: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::units::Entity")]
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

impl From<&Model> for OwnerInfo {
    fn from(model: &Model) -> Self {
        Self {
            id: OwnerId::from_uuid(model.id),
            owner_type: model.owner_type.clone().into(),
            status: model.status.clone().into(),
            name: model.name.clone(),
            is_system: model.is_system,
        }
    }
}

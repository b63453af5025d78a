//! `SeaORM` Entity for the units table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use custodia_core::registry::UnitInfo;
use custodia_shared::types::{OwnerId, UnitId};

use super::sea_orm_active_enums::UnitStatus;

/// A unit sub-account under a CLIENT/COMPANY owner.
///
/// The optional `property_id` is an external reference; property records
/// are managed outside this crate.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub property_id: Option<Uuid>,
    pub unit_name: String,
    pub status: UnitStatus,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::owners::Entity",
        from = "Column::OwnerId",
        to = "super::owners::Column::Id"
    )]
    Owners,
}

impl Related<super::owners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owners.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Model> for UnitInfo {
    fn from(model: &Model) -> Self {
        Self {
            id: UnitId::from_uuid(model.id),
            owner_id: OwnerId::from_uuid(model.owner_id),
            unit_name: model.unit_name.clone(),
            status: model.status.clone().into(),
        }
    }
}

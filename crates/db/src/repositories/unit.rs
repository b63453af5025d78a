//! Unit repository for sub-account registry operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use custodia_core::ledger::LedgerError;
use custodia_core::registry::{self, UnitInfo, UnitStatus};
use custodia_shared::types::UnitId;

use crate::entities::{owner_ledger_entries, units};

use super::map_db_err;

/// Input for creating a unit.
#[derive(Debug, Clone)]
pub struct CreateUnitInput {
    /// The CLIENT/COMPANY owner holding the unit.
    pub owner_id: Uuid,
    /// Optional external property reference.
    pub property_id: Option<Uuid>,
    /// Display name, prefixed onto ledger particulars.
    pub unit_name: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
}

/// Input for updating a unit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUnitInput {
    /// Re-home the unit under another owner. Rejected once the unit has
    /// ledger entries.
    pub owner_id: Option<Uuid>,
    /// New display name.
    pub unit_name: Option<String>,
    /// New lifecycle status.
    pub status: Option<UnitStatus>,
    /// New notes.
    pub notes: Option<String>,
}

/// Unit repository for registry operations.
#[derive(Debug, Clone)]
pub struct UnitRepository {
    db: DatabaseConnection,
}

impl UnitRepository {
    /// Creates a new unit repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a unit under an existing owner.
    pub async fn create(&self, input: CreateUnitInput) -> Result<units::Model, LedgerError> {
        // The owner must exist; FK enforcement alone would surface an
        // opaque database error.
        super::OwnerRepository::new(self.db.clone())
            .get(input.owner_id)
            .await?;

        let now = Utc::now().into();
        let unit = units::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(input.owner_id),
            property_id: Set(input.property_id),
            unit_name: Set(input.unit_name),
            status: Set(crate::entities::sea_orm_active_enums::UnitStatus::Active),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        unit.insert(&self.db).await.map_err(map_db_err)
    }

    /// Gets a unit by ID.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnitNotFound`] if no unit exists.
    pub async fn get(&self, id: Uuid) -> Result<units::Model, LedgerError> {
        units::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| LedgerError::UnitNotFound(UnitId::from_uuid(id)))
    }

    /// Lists the units of an owner, newest first.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<units::Model>, LedgerError> {
        units::Entity::find()
            .filter(units::Column::OwnerId.eq(owner_id))
            .order_by_desc(units::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    /// Returns true if any ledger entry is scoped to this unit.
    pub async fn has_ledger_entries(&self, unit_id: Uuid) -> Result<bool, LedgerError> {
        let count = owner_ledger_entries::Entity::find()
            .filter(owner_ledger_entries::Column::UnitId.eq(unit_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(count > 0)
    }

    /// Updates a unit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnitOwnerImmutable`] when changing the owner
    /// of a unit that already has ledger entries.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUnitInput,
    ) -> Result<units::Model, LedgerError> {
        let unit = self.get(id).await?;

        if let Some(new_owner_id) = input.owner_id {
            if new_owner_id != unit.owner_id {
                let has_entries = self.has_ledger_entries(id).await?;
                registry::validate_unit_owner_change(&UnitInfo::from(&unit), has_entries)?;
                super::OwnerRepository::new(self.db.clone())
                    .get(new_owner_id)
                    .await?;
            }
        }

        let mut active: units::ActiveModel = unit.into();
        if let Some(owner_id) = input.owner_id {
            active.owner_id = Set(owner_id);
        }
        if let Some(unit_name) = input.unit_name {
            active.unit_name = Set(unit_name);
        }
        if let Some(status) = input.status {
            active.status = Set(status.into());
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(map_db_err)
    }
}

//! Owner repository for account registry operations.
//!
//! Enforces the registry protections: the singleton SYSTEM owner is
//! immutable, and status transitions gate posting eligibility.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use custodia_core::ledger::LedgerError;
use custodia_core::registry::{self, OwnerInfo, OwnerStatus, OwnerType};
use custodia_shared::types::OwnerId;

use crate::entities::owners;

use super::map_db_err;

/// Input for creating an owner account.
#[derive(Debug, Clone)]
pub struct CreateOwnerInput {
    /// Unique human-facing code (e.g. `CLT-014`).
    pub owner_code: String,
    /// The owner's role in the trust model.
    pub owner_type: OwnerType,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// The user creating the owner.
    pub created_by: Option<Uuid>,
}

/// Input for updating an owner account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOwnerInput {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New lifecycle status.
    pub status: Option<OwnerStatus>,
}

/// Filter options for listing owners.
#[derive(Debug, Clone, Default)]
pub struct OwnerFilter {
    /// Filter by owner type.
    pub owner_type: Option<OwnerType>,
    /// Filter by lifecycle status.
    pub status: Option<OwnerStatus>,
}

/// Owner repository for registry operations.
#[derive(Debug, Clone)]
pub struct OwnerRepository {
    db: DatabaseConnection,
}

impl OwnerRepository {
    /// Creates a new owner repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an owner account.
    ///
    /// User-created owners always start ACTIVE and are never the SYSTEM
    /// owner; the SYSTEM owner is seeded once, outside this path.
    pub async fn create(&self, input: CreateOwnerInput) -> Result<owners::Model, LedgerError> {
        let now = Utc::now().into();
        let owner = owners::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_code: Set(input.owner_code),
            owner_type: Set(input.owner_type.into()),
            name: Set(input.name),
            description: Set(input.description),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            status: Set(crate::entities::sea_orm_active_enums::OwnerStatus::Active),
            is_system: Set(false),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        owner.insert(&self.db).await.map_err(map_db_err)
    }

    /// Gets an owner by ID.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::OwnerNotFound`] if no owner exists.
    pub async fn get(&self, id: Uuid) -> Result<owners::Model, LedgerError> {
        owners::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| LedgerError::OwnerNotFound(OwnerId::from_uuid(id)))
    }

    /// Finds the singleton SYSTEM owner.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::SystemOwnerMissing`] if it has not been
    /// seeded.
    pub async fn find_system(&self) -> Result<owners::Model, LedgerError> {
        owners::Entity::find()
            .filter(owners::Column::IsSystem.eq(true))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(LedgerError::SystemOwnerMissing)
    }

    /// Lists owners with optional filters, newest first.
    pub async fn list(&self, filter: OwnerFilter) -> Result<Vec<owners::Model>, LedgerError> {
        let mut query = owners::Entity::find();

        if let Some(owner_type) = filter.owner_type {
            let owner_type: crate::entities::sea_orm_active_enums::OwnerType = owner_type.into();
            query = query.filter(owners::Column::OwnerType.eq(owner_type));
        }
        if let Some(status) = filter.status {
            let status: crate::entities::sea_orm_active_enums::OwnerStatus = status.into();
            query = query.filter(owners::Column::Status.eq(status));
        }

        query
            .order_by_desc(owners::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    /// Updates an owner account.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::SystemOwnerProtected`] for the SYSTEM owner.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateOwnerInput,
    ) -> Result<owners::Model, LedgerError> {
        let owner = self.get(id).await?;
        registry::validate_owner_editable(&OwnerInfo::from(&owner))?;

        let mut active: owners::ActiveModel = owner.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(status) = input.status {
            active.status = Set(status.into());
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await.map_err(map_db_err)
    }

    /// Changes an owner's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::SystemOwnerProtected`] for the SYSTEM owner.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: OwnerStatus,
    ) -> Result<owners::Model, LedgerError> {
        self.update(
            id,
            UpdateOwnerInput {
                status: Some(status),
                ..UpdateOwnerInput::default()
            },
        )
        .await
    }

    /// Deletes an owner account.
    ///
    /// Foreign keys restrict deletion of any owner that has participated
    /// in transactions; retiring an owner is normally a status change.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::SystemOwnerProtected`] for the SYSTEM owner.
    pub async fn delete(&self, id: Uuid) -> Result<(), LedgerError> {
        let owner = self.get(id).await?;
        registry::validate_owner_editable(&OwnerInfo::from(&owner))?;

        owners::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}

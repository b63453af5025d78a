//! Database seeder for Custodia development and testing.
//!
//! Seeds the singleton SYSTEM owner (required before any opening balance
//! can be posted), a MAIN operating account, and a pair of sample clients
//! for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use custodia_db::OwnerRepository;
use custodia_db::entities::{
    owners,
    sea_orm_active_enums::{OwnerStatus, OwnerType},
};
use custodia_db::repositories::owner::CreateOwnerInput;
use custodia_shared::AppConfig;

/// SYSTEM owner ID (consistent for all seeds)
const SYSTEM_OWNER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// MAIN owner ID (consistent for all seeds)
const MAIN_OWNER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "custodia=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| AppConfig::load().ok().map(|config| config.database.url))
        .expect("Set DATABASE_URL or CUSTODIA__DATABASE__URL");

    info!("Connecting to database...");
    let db = custodia_db::connect(&database_url).await?;

    info!("Seeding SYSTEM owner...");
    seed_system_owner(&db).await?;

    info!("Seeding MAIN operating account...");
    seed_main_owner(&db).await?;

    info!("Seeding sample clients...");
    seed_sample_clients(&db).await?;

    info!("Seeding complete!");
    Ok(())
}

fn system_owner_id() -> Uuid {
    Uuid::parse_str(SYSTEM_OWNER_ID).unwrap()
}

fn main_owner_id() -> Uuid {
    Uuid::parse_str(MAIN_OWNER_ID).unwrap()
}

/// Seeds the singleton SYSTEM owner.
///
/// The repository create path refuses to mint SYSTEM owners, so the seeder
/// inserts it directly. The partial unique index on `is_system` makes a
/// second insert fail loudly rather than split the opening-balance anchor.
async fn seed_system_owner(db: &DatabaseConnection) -> anyhow::Result<()> {
    let existing = owners::Entity::find_by_id(system_owner_id()).one(db).await?;
    if existing.is_some() {
        info!("SYSTEM owner already present, skipping");
        return Ok(());
    }

    let now = Utc::now().into();
    owners::ActiveModel {
        id: Set(system_owner_id()),
        owner_code: Set("SYS-000".to_string()),
        owner_type: Set(OwnerType::System),
        name: Set("System".to_string()),
        description: Set(Some(
            "Counterparty for opening balances and adjustments".to_string(),
        )),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        status: Set(OwnerStatus::Active),
        is_system: Set(true),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn seed_main_owner(db: &DatabaseConnection) -> anyhow::Result<()> {
    let existing = owners::Entity::find_by_id(main_owner_id()).one(db).await?;
    if existing.is_some() {
        info!("MAIN owner already present, skipping");
        return Ok(());
    }

    let now = Utc::now().into();
    owners::ActiveModel {
        id: Set(main_owner_id()),
        owner_code: Set("MAIN-001".to_string()),
        owner_type: Set(OwnerType::Main),
        name: Set("Trust Operating Account".to_string()),
        description: Set(Some("Pooled trust funds".to_string())),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        status: Set(OwnerStatus::Active),
        is_system: Set(false),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(())
}

async fn seed_sample_clients(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = OwnerRepository::new(db.clone());

    for (code, name) in [
        ("CLT-001", "Acme Property Holdings"),
        ("CLT-002", "Rivera Family Trust"),
    ] {
        let existing = owners::Entity::find()
            .filter(owners::Column::OwnerCode.eq(code))
            .one(db)
            .await?;
        if existing.is_some() {
            info!("{code} already present, skipping");
            continue;
        }

        repo.create(CreateOwnerInput {
            owner_code: code.to_string(),
            owner_type: custodia_core::registry::OwnerType::Client,
            name: name.to_string(),
            description: None,
            email: None,
            phone: None,
            address: None,
            created_by: None,
        })
        .await
        .map_err(|err| anyhow::anyhow!("Failed to seed {code}: {err}"))?;
    }
    Ok(())
}

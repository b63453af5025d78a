//! Initial database migration.
//!
//! Creates the enum types, the owners/units/transactions tables, and the
//! append-only owner_ledger_entries table with its stream index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNT REGISTRY
        // ============================================================
        db.execute_unprepared(OWNERS_SQL).await?;
        db.execute_unprepared(UNITS_SQL).await?;

        // ============================================================
        // PART 3: TRANSACTIONS & LEDGER
        // ============================================================
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(OWNER_LEDGER_ENTRIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Owner account roles
CREATE TYPE owner_type AS ENUM (
    'MAIN',
    'CLIENT',
    'COMPANY',
    'SYSTEM'
);

-- Owner lifecycle status
CREATE TYPE owner_status AS ENUM (
    'ACTIVE',
    'INACTIVE',
    'SUSPENDED'
);

-- Unit lifecycle status
CREATE TYPE unit_status AS ENUM (
    'ACTIVE',
    'INACTIVE',
    'SUSPENDED'
);

-- Transaction business method
CREATE TYPE transaction_method AS ENUM (
    'DEPOSIT',
    'WITHDRAWAL',
    'TRANSFER'
);

-- Transaction instrument category
CREATE TYPE transaction_kind AS ENUM (
    'CHEQUE',
    'DEPOSIT_SLIP',
    'CASH_DEPOSIT',
    'CHEQUE_DEPOSIT',
    'BANK_TRANSFER',
    'OPENING'
);
";

const OWNERS_SQL: &str = r"
CREATE TABLE owners (
    id UUID PRIMARY KEY,
    owner_code VARCHAR(30) NOT NULL UNIQUE,
    owner_type owner_type NOT NULL,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    email VARCHAR(255),
    phone VARCHAR(100),
    address TEXT,
    status owner_status NOT NULL DEFAULT 'ACTIVE',
    is_system BOOLEAN NOT NULL DEFAULT FALSE,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_owners_owner_type ON owners (owner_type);
CREATE INDEX idx_owners_status ON owners (status);
CREATE INDEX idx_owners_name ON owners (name);

-- Exactly one SYSTEM owner may ever exist
CREATE UNIQUE INDEX idx_owners_singleton_system ON owners (is_system) WHERE is_system;
";

const UNITS_SQL: &str = r"
CREATE TABLE units (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE CASCADE,
    property_id UUID,
    unit_name VARCHAR(255) NOT NULL,
    status unit_status NOT NULL DEFAULT 'ACTIVE',
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_units_owner_id ON units (owner_id);
CREATE INDEX idx_units_status ON units (status);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    voucher_no VARCHAR(100),
    voucher_date DATE,
    trans_method transaction_method NOT NULL,
    trans_kind transaction_kind NOT NULL,
    from_owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE RESTRICT,
    to_owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE RESTRICT,
    unit_id UUID REFERENCES units (id) ON DELETE SET NULL,
    amount NUMERIC(11, 2) NOT NULL CHECK (amount >= 0.01 AND amount <= 999999999.99),
    instrument_no VARCHAR(255),
    fund_reference VARCHAR(255),
    particulars TEXT NOT NULL,
    transfer_group_id UUID,
    person_in_charge VARCHAR(255),
    is_posted BOOLEAN NOT NULL DEFAULT FALSE,
    posted_at TIMESTAMPTZ,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX idx_transactions_voucher_no ON transactions (voucher_no)
    WHERE voucher_no IS NOT NULL;
CREATE INDEX idx_transactions_trans_method ON transactions (trans_method);
CREATE INDEX idx_transactions_from_owner_id ON transactions (from_owner_id);
CREATE INDEX idx_transactions_to_owner_id ON transactions (to_owner_id);
CREATE INDEX idx_transactions_is_posted ON transactions (is_posted);
CREATE INDEX idx_transactions_created_at ON transactions (created_at);
";

const OWNER_LEDGER_ENTRIES_SQL: &str = r"
-- Precomputed ledger per owner: one transaction = two entries.
-- Append-only; rows are never updated or deleted outside administrative
-- removal of an unposted transaction (cascade).
CREATE TABLE owner_ledger_entries (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES owners (id) ON DELETE CASCADE,
    transaction_id UUID NOT NULL REFERENCES transactions (id) ON DELETE CASCADE,
    voucher_no VARCHAR(100) NOT NULL,
    voucher_date DATE,
    instrument_no VARCHAR(255),
    debit NUMERIC(14, 2) NOT NULL DEFAULT 0,
    credit NUMERIC(14, 2) NOT NULL DEFAULT 0,
    running_balance NUMERIC(14, 2) NOT NULL,
    unit_id UUID REFERENCES units (id) ON DELETE SET NULL,
    particulars TEXT NOT NULL,
    transfer_group_id UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    -- Exactly one side of every entry carries the amount
    CONSTRAINT chk_entry_single_side CHECK (
        (debit > 0 AND credit = 0) OR (credit > 0 AND debit = 0)
    )
);

-- Stream scans: latest-entry lookup and statement rendering both walk
-- (owner_id, unit_id) ordered by (created_at, id).
CREATE INDEX idx_ledger_entries_stream
    ON owner_ledger_entries (owner_id, unit_id, created_at, id);
CREATE INDEX idx_ledger_entries_transaction_id ON owner_ledger_entries (transaction_id);
CREATE INDEX idx_ledger_entries_transfer_group_id ON owner_ledger_entries (transfer_group_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS owner_ledger_entries;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS units;
DROP TABLE IF EXISTS owners;

DROP TYPE IF EXISTS transaction_kind;
DROP TYPE IF EXISTS transaction_method;
DROP TYPE IF EXISTS unit_status;
DROP TYPE IF EXISTS owner_status;
DROP TYPE IF EXISTS owner_type;
";

//! `SeaORM` entity definitions for the trust-accounting schema.

pub mod owner_ledger_entries;
pub mod owners;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod units;

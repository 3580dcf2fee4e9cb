//! The applied-migrations ledger.
//!
//! The executor only talks to persistence through the [`Ledger`] trait:
//! list the applied names, record one name as applied, and revert a batch.
//!
//! # Ordering
//!
//! `applied` returns names in the order they were marked, oldest first.
//! `Down(count)` selects a prefix of that order, so every implementation
//! must keep it stable.

mod file;
mod memory;
mod rollback;
mod storage;
mod types;

pub use file::FileLedger;
pub use memory::MemoryLedger;
pub use rollback::RollbackLedger;
pub use types::{AppliedMigration, LedgerFile, LEDGER_SCHEMA_VERSION};

use crate::migration::MigrationError;
use async_trait::async_trait;

/// Durable record of applied migrations.
#[async_trait]
pub trait Ledger<D>: Send + Sync
where
    D: Send + Sync + 'static,
{
    /// All names currently recorded as applied, oldest first.
    async fn applied(&self, db: &D) -> Result<Vec<String>, MigrationError>;

    /// Record a single name as applied.
    async fn mark_applied(&self, db: &D, name: &str) -> Result<(), MigrationError>;

    /// Undo and remove `names` from the record as one unit.
    async fn revert(&self, db: &D, names: &[String]) -> Result<(), MigrationError>;
}

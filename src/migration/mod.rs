//! Migration system.
//!
//! This module tracks named migrations and applies the ones a database has
//! not seen yet.
//!
//! # Overview
//!
//! - Migrations are registered by name in a `MigrationRegistry`
//! - A `Ledger` records which names have been applied
//! - The `Migrator` computes pending names (registered minus applied,
//!   sorted) and applies them one at a time, recording each success
//! - The first failure stops the run; re-running `apply` resumes safely
//! - `down(count)` reverts a prefix of the applied list through the ledger
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = MigrationRegistry::new();
//! registry.add_fn("0001_create_users", |db: &Db| db.execute(CREATE_USERS));
//! let migrator = Migrator::new(Arc::new(registry), FileLedger::open(project_path).await?);
//! let applied = migrator.apply(&db).await?;
//! ```

mod executor;
mod plan;
mod registry;
mod types;

pub use executor::{revert_applied, Migrator};
pub use plan::{orphaned_names, pending_names, select_for_revert};
pub use registry::MigrationRegistry;
pub use types::{FnMigration, Migration, MigrationError, MigrationStatus};

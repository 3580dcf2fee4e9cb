//! Migration executor for applying and reverting migrations.

use super::plan::{orphaned_names, pending_names, select_for_revert};
use super::registry::MigrationRegistry;
use super::types::{MigrationError, MigrationStatus};
use crate::ledger::Ledger;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Executor for running migrations.
///
/// The executor pairs a registry of migrations with the ledger that records
/// which of them have been applied. Errors from the ledger and from
/// migrations are returned unchanged.
pub struct Migrator<D, L>
where
    D: Send + Sync + 'static,
{
    registry: Arc<MigrationRegistry<D>>,
    ledger: L,
}

impl<D, L> Migrator<D, L>
where
    D: Send + Sync + 'static,
    L: Ledger<D>,
{
    /// Create a new executor with the given registry and ledger.
    pub fn new(registry: Arc<MigrationRegistry<D>>, ledger: L) -> Self {
        Self { registry, ledger }
    }

    pub fn registry(&self) -> &MigrationRegistry<D> {
        &self.registry
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Registered migrations not yet recorded as applied, sorted by name.
    pub async fn new_names(&self, db: &D) -> Result<Vec<String>, MigrationError> {
        let applied = self.ledger.applied(db).await?;
        Ok(pending_names(&self.registry.names(), &applied))
    }

    /// Apply every pending migration in name order.
    ///
    /// Each migration is recorded in the ledger right after it succeeds.
    /// The first failing migration or failing record stops the run; the
    /// failing migration is not recorded, and everything before it stays
    /// recorded, so calling `apply` again resumes where this call stopped.
    ///
    /// Returns the names applied by this call.
    pub async fn apply(&self, db: &D) -> Result<Vec<String>, MigrationError> {
        let pending = self.new_names(db).await?;

        if pending.is_empty() {
            debug!("No pending migrations");
            return Ok(pending);
        }

        info!(count = pending.len(), "Applying migrations");

        let mut applied = Vec::with_capacity(pending.len());
        for name in pending {
            let migration = self
                .registry
                .get(&name)
                .ok_or_else(|| MigrationError::UnknownMigration(name.clone()))?;

            info!(
                migration = %name,
                description = migration.description(),
                "Applying migration"
            );

            if let Err(e) = migration.up(db).await {
                error!(migration = %name, error = %e, "Migration failed");
                return Err(e);
            }

            if let Err(e) = self.ledger.mark_applied(db, &name).await {
                error!(
                    migration = %name,
                    error = %e,
                    "Migration ran but could not be recorded"
                );
                return Err(e);
            }

            applied.push(name);
        }

        info!(count = applied.len(), "Migrations applied successfully");
        Ok(applied)
    }

    /// Revert the first `count` applied migrations, or all when `count` is 0.
    ///
    /// See [`revert_applied`].
    pub async fn down(&self, db: &D, count: usize) -> Result<Vec<String>, MigrationError> {
        revert_applied(&self.ledger, db, count).await
    }

    /// Applied, pending and orphaned migrations at this moment.
    pub async fn status(&self, db: &D) -> Result<MigrationStatus, MigrationError> {
        let applied = self.ledger.applied(db).await?;
        let registered = self.registry.names();

        Ok(MigrationStatus {
            pending: pending_names(&registered, &applied),
            orphaned: orphaned_names(&registered, &applied),
            applied,
        })
    }
}

/// Hand the leading `count` entries of the ledger's applied list (all of
/// them when `count` is 0 or too large) to the ledger's revert, in one call.
///
/// Does nothing when no migration is applied. Returns the names passed to
/// the revert.
pub async fn revert_applied<D, L>(
    ledger: &L,
    db: &D,
    count: usize,
) -> Result<Vec<String>, MigrationError>
where
    D: Send + Sync + 'static,
    L: Ledger<D> + ?Sized,
{
    let applied = ledger.applied(db).await?;
    let selected = select_for_revert(&applied, count);

    if selected.is_empty() {
        debug!("No applied migrations to revert");
        return Ok(Vec::new());
    }

    info!(
        count = selected.len(),
        requested = count,
        "Reverting migrations"
    );

    if let Err(e) = ledger.revert(db, selected).await {
        error!(error = %e, "Revert failed");
        return Err(e);
    }

    info!(count = selected.len(), "Migrations reverted");
    Ok(selected.to_vec())
}

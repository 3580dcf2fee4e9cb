use super::storage::{read_ledger, write_ledger};
use super::types::AppliedMigration;
use super::Ledger;
use crate::config::{read_config, resolve_ledger_path};
use crate::migration::MigrationError;
use crate::utils::now_iso;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Ledger persisted as a JSON file.
///
/// The database handle is not consulted; the record lives beside the
/// project instead of inside the database.
pub struct FileLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Open the ledger configured for a project directory.
    pub async fn open(project_path: &Path) -> Result<Self, MigrationError> {
        let config = read_config(project_path)
            .await
            .map_err(|e| MigrationError::ConfigError(e.to_string()))?;
        let path = resolve_ledger_path(project_path, config.as_ref());
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applied entries with their timestamps, oldest first.
    pub async fn entries(&self) -> Result<Vec<AppliedMigration>, MigrationError> {
        let _guard = self.lock.lock().await;
        Ok(read_ledger(&self.path).await?.applied)
    }
}

#[async_trait]
impl<D> Ledger<D> for FileLedger
where
    D: Send + Sync + 'static,
{
    async fn applied(&self, _db: &D) -> Result<Vec<String>, MigrationError> {
        let _guard = self.lock.lock().await;
        Ok(read_ledger(&self.path).await?.names())
    }

    async fn mark_applied(&self, _db: &D, name: &str) -> Result<(), MigrationError> {
        // Lock the entire read-modify-write cycle
        let _guard = self.lock.lock().await;

        let mut ledger = read_ledger(&self.path).await?;
        if ledger.contains(name) {
            return Err(MigrationError::AlreadyApplied(name.to_string()));
        }

        let now = now_iso();
        ledger.applied.push(AppliedMigration {
            name: name.to_string(),
            applied_at: now.clone(),
        });
        ledger.updated_at = now;
        write_ledger(&self.path, &ledger).await?;

        debug!(migration = %name, path = %self.path.display(), "Recorded migration");
        Ok(())
    }

    async fn revert(&self, _db: &D, names: &[String]) -> Result<(), MigrationError> {
        let _guard = self.lock.lock().await;

        let mut ledger = read_ledger(&self.path).await?;
        if let Some(missing) = names.iter().find(|name| !ledger.contains(name)) {
            return Err(MigrationError::NotApplied(missing.clone()));
        }

        ledger.applied.retain(|m| !names.contains(&m.name));
        ledger.updated_at = now_iso();
        write_ledger(&self.path, &ledger).await?;

        debug!(
            count = names.len(),
            path = %self.path.display(),
            "Removed migrations from ledger"
        );
        Ok(())
    }
}

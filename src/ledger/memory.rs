use super::Ledger;
use crate::migration::MigrationError;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-process ledger with the same contract as [`super::FileLedger`].
#[derive(Default)]
pub struct MemoryLedger {
    applied: Mutex<Vec<String>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing applied list (oldest first).
    pub fn with_applied<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            applied: Mutex::new(names.into_iter().map(Into::into).collect()),
        }
    }

    pub async fn snapshot(&self) -> Vec<String> {
        self.applied.lock().await.clone()
    }
}

#[async_trait]
impl<D> Ledger<D> for MemoryLedger
where
    D: Send + Sync + 'static,
{
    async fn applied(&self, _db: &D) -> Result<Vec<String>, MigrationError> {
        Ok(self.applied.lock().await.clone())
    }

    async fn mark_applied(&self, _db: &D, name: &str) -> Result<(), MigrationError> {
        let mut applied = self.applied.lock().await;
        if applied.iter().any(|n| n == name) {
            return Err(MigrationError::AlreadyApplied(name.to_string()));
        }
        applied.push(name.to_string());
        Ok(())
    }

    async fn revert(&self, _db: &D, names: &[String]) -> Result<(), MigrationError> {
        let mut applied = self.applied.lock().await;
        if let Some(missing) = names.iter().find(|name| !applied.contains(*name)) {
            return Err(MigrationError::NotApplied(missing.clone()));
        }
        applied.retain(|n| !names.contains(n));
        Ok(())
    }
}

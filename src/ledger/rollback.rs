use super::Ledger;
use crate::migration::{MigrationError, MigrationRegistry};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

/// Ledger wrapper that runs each migration's backward action on revert.
///
/// Every requested name must be recorded in the inner ledger exactly once,
/// registered and reversible before anything runs. Migrations are then
/// undone newest first, and each name is removed from the inner ledger
/// right after its `down` succeeds, so a failure leaves the record matching
/// what was actually undone.
pub struct RollbackLedger<D, L>
where
    D: Send + Sync + 'static,
{
    registry: Arc<MigrationRegistry<D>>,
    inner: L,
}

impl<D, L> RollbackLedger<D, L>
where
    D: Send + Sync + 'static,
    L: Ledger<D>,
{
    pub fn new(registry: Arc<MigrationRegistry<D>>, inner: L) -> Self {
        Self { registry, inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<D, L> Ledger<D> for RollbackLedger<D, L>
where
    D: Send + Sync + 'static,
    L: Ledger<D>,
{
    async fn applied(&self, db: &D) -> Result<Vec<String>, MigrationError> {
        self.inner.applied(db).await
    }

    async fn mark_applied(&self, db: &D, name: &str) -> Result<(), MigrationError> {
        self.inner.mark_applied(db, name).await
    }

    async fn revert(&self, db: &D, names: &[String]) -> Result<(), MigrationError> {
        // Removing as we go rejects names listed twice
        let mut recorded: HashSet<String> = self.inner.applied(db).await?.into_iter().collect();

        let mut migrations = Vec::with_capacity(names.len());
        for name in names {
            if !recorded.remove(name) {
                return Err(MigrationError::NotApplied(name.clone()));
            }
            let migration = self
                .registry
                .get(name)
                .ok_or_else(|| MigrationError::UnknownMigration(name.clone()))?;
            if !migration.is_reversible() {
                return Err(MigrationError::Irreversible(name.clone()));
            }
            migrations.push((name, migration));
        }

        for (name, migration) in migrations.into_iter().rev() {
            info!(migration = %name, "Reverting migration");
            if let Err(e) = migration.down(db).await {
                error!(migration = %name, error = %e, "Revert failed");
                return Err(e);
            }
            self.inner.revert(db, std::slice::from_ref(name)).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use std::sync::Mutex;

    type Log = Mutex<Vec<String>>;

    fn registry() -> Arc<MigrationRegistry<Log>> {
        let mut registry = MigrationRegistry::new();
        for name in ["001", "002", "003"] {
            registry.add_reversible_fn(name, |_: &Log| Ok(()), move |log: &Log| {
                log.lock().unwrap().push(name.to_string());
                Ok(())
            });
        }
        registry.add_fn("004", |_: &Log| Ok(()));
        Arc::new(registry)
    }

    #[tokio::test]
    async fn test_revert_runs_down_newest_first() {
        let ledger = RollbackLedger::new(
            registry(),
            MemoryLedger::with_applied(["001", "002", "003"]),
        );
        let log = Log::default();

        ledger
            .revert(&log, &["001".to_string(), "002".to_string()])
            .await
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["002", "001"]);
        assert_eq!(ledger.inner().snapshot().await, vec!["003"]);
    }

    #[tokio::test]
    async fn test_irreversible_name_runs_nothing() {
        let ledger = RollbackLedger::new(registry(), MemoryLedger::with_applied(["001", "004"]));
        let log = Log::default();

        let err = ledger
            .revert(&log, &["001".to_string(), "004".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::Irreversible(name) if name == "004"));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(ledger.inner().snapshot().await, vec!["001", "004"]);
    }

    #[tokio::test]
    async fn test_unknown_name_runs_nothing() {
        let ledger = RollbackLedger::new(registry(), MemoryLedger::with_applied(["gone"]));
        let log = Log::default();

        let err = ledger
            .revert(&log, &["gone".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::UnknownMigration(name) if name == "gone"));
    }

    #[tokio::test]
    async fn test_unapplied_name_runs_nothing() {
        let ledger = RollbackLedger::new(registry(), MemoryLedger::with_applied(["001"]));
        let log = Log::default();

        let err = ledger
            .revert(&log, &["001".to_string(), "002".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::NotApplied(name) if name == "002"));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(ledger.inner().snapshot().await, vec!["001"]);
    }

    #[tokio::test]
    async fn test_repeated_name_runs_nothing() {
        let ledger = RollbackLedger::new(registry(), MemoryLedger::with_applied(["001", "002"]));
        let log = Log::default();

        let err = ledger
            .revert(&log, &["001".to_string(), "001".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::NotApplied(name) if name == "001"));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(ledger.inner().snapshot().await, vec!["001", "002"]);
    }

    #[tokio::test]
    async fn test_down_failure_keeps_unreverted_names() {
        fn locked(_: &Log) -> Result<(), MigrationError> {
            Err(MigrationError::MigrationFailed("001".into(), "locked".into()))
        }

        let mut registry = MigrationRegistry::new();
        registry.add_reversible_fn("001", |_: &Log| Ok(()), locked);
        registry.add_reversible_fn("002", |_: &Log| Ok(()), |_: &Log| Ok(()));

        let ledger = RollbackLedger::new(
            Arc::new(registry),
            MemoryLedger::with_applied(["001", "002"]),
        );
        let err = ledger
            .revert(&Log::default(), &["001".to_string(), "002".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, MigrationError::MigrationFailed(name, _) if name == "001"));
        assert_eq!(ledger.inner().snapshot().await, vec!["001"]);
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use ledger_migrate::{Ledger, MigrationError, MigrationRegistry};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Database handle for tests: records the order migrations ran in
pub type Trace = Mutex<Vec<String>>;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn traced(trace: &Trace) -> Vec<String> {
    trace.lock().unwrap().clone()
}

/// Register a migration that records itself and succeeds
pub fn add_ok(registry: &mut MigrationRegistry<Trace>, name: &str) {
    let label = name.to_string();
    registry.add_fn(name, move |trace: &Trace| {
        trace.lock().unwrap().push(label.clone());
        Ok(())
    });
}

/// Register a migration that records itself and fails with `message`
pub fn add_failing(registry: &mut MigrationRegistry<Trace>, name: &str, message: &str) {
    let label = name.to_string();
    let message = message.to_string();
    registry.add_fn(name, move |trace: &Trace| {
        trace.lock().unwrap().push(label.clone());
        let err = MigrationError::MigrationFailed(label.clone(), message.clone());
        Err(err)
    });
}

pub fn shared(registry: MigrationRegistry<Trace>) -> Arc<MigrationRegistry<Trace>> {
    Arc::new(registry)
}

/// Ledger test double with a fixed applied list and injectable failures.
///
/// Failures are `LedgerError(message)` so tests can tell exactly which
/// call produced the error they got back.
#[derive(Default)]
pub struct ScriptedLedger {
    pub applied: Vec<String>,
    pub applied_err: Option<String>,
    pub mark_err: Option<String>,
    pub revert_err: Option<String>,
    pub applied_calls: Mutex<usize>,
    pub marked: Mutex<Vec<String>>,
    pub reverted: Mutex<Vec<Vec<String>>>,
}

impl ScriptedLedger {
    pub fn with_applied(applied: &[&str]) -> Self {
        Self {
            applied: names(applied),
            ..Default::default()
        }
    }

    pub fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }

    pub fn reverted(&self) -> Vec<Vec<String>> {
        self.reverted.lock().unwrap().clone()
    }

    pub fn applied_calls(&self) -> usize {
        *self.applied_calls.lock().unwrap()
    }
}

#[async_trait]
impl<D> Ledger<D> for ScriptedLedger
where
    D: Send + Sync + 'static,
{
    async fn applied(&self, _db: &D) -> Result<Vec<String>, MigrationError> {
        *self.applied_calls.lock().unwrap() += 1;
        match &self.applied_err {
            Some(message) => Err(MigrationError::LedgerError(message.clone())),
            None => Ok(self.applied.clone()),
        }
    }

    async fn mark_applied(&self, _db: &D, name: &str) -> Result<(), MigrationError> {
        self.marked.lock().unwrap().push(name.to_string());
        match &self.mark_err {
            Some(message) => Err(MigrationError::LedgerError(message.clone())),
            None => Ok(()),
        }
    }

    async fn revert(&self, _db: &D, names: &[String]) -> Result<(), MigrationError> {
        self.reverted.lock().unwrap().push(names.to_vec());
        match &self.revert_err {
            Some(message) => Err(MigrationError::LedgerError(message.clone())),
            None => Ok(()),
        }
    }
}

/// True when `err` is the ledger failure carrying `message`
pub fn is_ledger_error(err: &MigrationError, message: &str) -> bool {
    matches!(err, MigrationError::LedgerError(m) if m == message)
}

/// True when `err` is the failure of migration `name` carrying `message`
pub fn is_migration_error(err: &MigrationError, name: &str, message: &str) -> bool {
    matches!(err, MigrationError::MigrationFailed(n, m) if n == name && m == message)
}

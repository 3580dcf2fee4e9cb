//! Types for the migration system.

use async_trait::async_trait;
use thiserror::Error;

/// Error types for migration operations.
///
/// Migration actions and ledgers return this type and the executor hands it
/// back to the caller exactly as it received it.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Migration {0} failed: {1}")]
    MigrationFailed(String, String),

    #[error("Ledger error: {0}")]
    LedgerError(String),

    #[error("Migration {0} is already recorded as applied")]
    AlreadyApplied(String),

    #[error("Migration {0} is not recorded as applied")]
    NotApplied(String),

    #[error("Migration {0} is not registered")]
    UnknownMigration(String),

    #[error("Migration {0} cannot be reverted")]
    Irreversible(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Trait for a single migration.
///
/// A migration is a forward action run against the database handle `D`.
/// Its identity is the name it is registered under, not part of the trait.
#[async_trait]
pub trait Migration<D>: Send + Sync
where
    D: Send + Sync + 'static,
{
    /// Human-readable description of what this migration does.
    fn description(&self) -> &str {
        ""
    }

    /// Apply the migration.
    async fn up(&self, db: &D) -> Result<(), MigrationError>;

    /// Whether `down` actually undoes `up`.
    fn is_reversible(&self) -> bool {
        false
    }

    /// Revert the migration. Only called when `is_reversible` returns true.
    async fn down(&self, _db: &D) -> Result<(), MigrationError> {
        Ok(())
    }
}

type ActionFn<D> = Box<dyn Fn(&D) -> Result<(), MigrationError> + Send + Sync>;

/// A migration built from plain closures.
pub struct FnMigration<D> {
    up: ActionFn<D>,
    down: Option<ActionFn<D>>,
}

impl<D> FnMigration<D> {
    /// Create a forward-only migration.
    pub fn new<F>(up: F) -> Self
    where
        F: Fn(&D) -> Result<(), MigrationError> + Send + Sync + 'static,
    {
        Self {
            up: Box::new(up),
            down: None,
        }
    }

    /// Attach a backward action.
    pub fn with_down<F>(mut self, down: F) -> Self
    where
        F: Fn(&D) -> Result<(), MigrationError> + Send + Sync + 'static,
    {
        self.down = Some(Box::new(down));
        self
    }
}

#[async_trait]
impl<D> Migration<D> for FnMigration<D>
where
    D: Send + Sync + 'static,
{
    async fn up(&self, db: &D) -> Result<(), MigrationError> {
        (self.up)(db)
    }

    fn is_reversible(&self) -> bool {
        self.down.is_some()
    }

    async fn down(&self, db: &D) -> Result<(), MigrationError> {
        match &self.down {
            Some(down) => down(db),
            None => Ok(()),
        }
    }
}

/// Snapshot of registered migrations against the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Names recorded as applied, in ledger order.
    pub applied: Vec<String>,
    /// Registered names not yet applied, sorted.
    pub pending: Vec<String>,
    /// Applied names that are no longer registered, in ledger order.
    pub orphaned: Vec<String>,
}

impl MigrationStatus {
    /// True when nothing is waiting to be applied.
    pub fn is_up_to_date(&self) -> bool {
        self.pending.is_empty()
    }
}

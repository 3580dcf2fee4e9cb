pub mod config;
pub mod ledger;
pub mod migration;
pub mod utils;

// Re-export commonly used types
pub use config::{read_config, resolve_ledger_path, write_config, ConfigError, MigrateConfig};
pub use ledger::{AppliedMigration, FileLedger, Ledger, LedgerFile, MemoryLedger, RollbackLedger};
pub use migration::{
    revert_applied, FnMigration, Migration, MigrationError, MigrationRegistry, MigrationStatus,
    Migrator,
};

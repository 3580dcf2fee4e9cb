//! Migration registry mapping names to forward actions.

use super::types::{FnMigration, Migration, MigrationError};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of all available migrations.
///
/// Registering a name twice replaces the earlier migration.
pub struct MigrationRegistry<D>
where
    D: Send + Sync + 'static,
{
    migrations: HashMap<String, Arc<dyn Migration<D>>>,
}

impl<D> MigrationRegistry<D>
where
    D: Send + Sync + 'static,
{
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            migrations: HashMap::new(),
        }
    }

    /// Register a migration under `name`.
    pub fn add(&mut self, name: impl Into<String>, migration: Arc<dyn Migration<D>>) {
        self.migrations.insert(name.into(), migration);
    }

    /// Register a forward-only migration from a closure.
    pub fn add_fn<F>(&mut self, name: impl Into<String>, up: F)
    where
        F: Fn(&D) -> Result<(), MigrationError> + Send + Sync + 'static,
    {
        self.add(name, Arc::new(FnMigration::new(up)));
    }

    /// Register a migration with both a forward and a backward closure.
    pub fn add_reversible_fn<U, R>(&mut self, name: impl Into<String>, up: U, down: R)
    where
        U: Fn(&D) -> Result<(), MigrationError> + Send + Sync + 'static,
        R: Fn(&D) -> Result<(), MigrationError> + Send + Sync + 'static,
    {
        self.add(name, Arc::new(FnMigration::new(up).with_down(down)));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Migration<D>>> {
        self.migrations.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.migrations.contains_key(name)
    }

    /// All registered names in ascending order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.migrations.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

impl<D> Default for MigrationRegistry<D>
where
    D: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

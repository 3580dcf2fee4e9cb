use crate::utils::{get_migrate_path, CONFIG_FILE, LEDGER_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Project configuration stored in .migrate/config.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateConfig {
    /// Ledger file location relative to the project root.
    /// Defaults to .migrate/ledger.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<String>,
}

/// Read the configuration file
pub async fn read_config(project_path: &Path) -> Result<Option<MigrateConfig>, ConfigError> {
    let config_path = get_migrate_path(project_path).join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).await?;
    let config: MigrateConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}

/// Write the configuration file
pub async fn write_config(project_path: &Path, config: &MigrateConfig) -> Result<(), ConfigError> {
    let migrate_path = get_migrate_path(project_path);
    fs::create_dir_all(&migrate_path).await?;

    let content = serde_json::to_string_pretty(config)?;
    fs::write(migrate_path.join(CONFIG_FILE), content).await?;
    Ok(())
}

/// Where the ledger file lives for a project
pub fn resolve_ledger_path(project_path: &Path, config: Option<&MigrateConfig>) -> PathBuf {
    match config.and_then(|c| c.ledger_file.as_deref()) {
        Some(file) => project_path.join(file),
        None => get_migrate_path(project_path).join(LEDGER_FILE),
    }
}

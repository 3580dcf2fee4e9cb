use super::types::LedgerFile;
use crate::migration::MigrationError;
use std::path::Path;
use tokio::fs;

/// Read the ledger from disk, empty if the file does not exist yet
pub async fn read_ledger(path: &Path) -> Result<LedgerFile, MigrationError> {
    if !path.exists() {
        return Ok(LedgerFile::new());
    }

    let content = fs::read_to_string(path).await?;
    let ledger: LedgerFile = serde_json::from_str(&content)?;
    Ok(ledger)
}

/// Write the ledger to disk (caller must hold the ledger lock)
pub async fn write_ledger(path: &Path, ledger: &LedgerFile) -> Result<(), MigrationError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    // Write atomically using temp file + rename
    let temp_path = path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(ledger)?;
    fs::write(&temp_path, &content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}

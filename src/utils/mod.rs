use std::path::{Path, PathBuf};

/// The name of the per-project migrate folder
pub const MIGRATE_FOLDER: &str = ".migrate";

/// The name of the config file inside the migrate folder
pub const CONFIG_FILE: &str = "config.json";

/// The default ledger file name inside the migrate folder
pub const LEDGER_FILE: &str = "ledger.json";

/// Get the path to the .migrate folder
pub fn get_migrate_path(project_path: &Path) -> PathBuf {
    project_path.join(MIGRATE_FOLDER)
}

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

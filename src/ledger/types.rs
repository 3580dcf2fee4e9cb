use serde::{Deserialize, Serialize};

pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// A single applied migration as stored in the ledger file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedMigration {
    pub name: String,
    pub applied_at: String,
}

/// The ledger file stored at .migrate/ledger.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerFile {
    /// Schema version of the file layout
    pub schema_version: u32,

    /// When the ledger was last modified
    pub updated_at: String,

    /// Applied migrations in the order they were marked
    #[serde(default)]
    pub applied: Vec<AppliedMigration>,
}

impl LedgerFile {
    pub fn new() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            updated_at: crate::utils::now_iso(),
            applied: Vec::new(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.applied.iter().map(|m| m.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.applied.iter().any(|m| m.name == name)
    }
}

impl Default for LedgerFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_file_new() {
        let ledger = LedgerFile::new();
        assert_eq!(ledger.schema_version, LEDGER_SCHEMA_VERSION);
        assert!(ledger.applied.is_empty());
        assert!(!ledger.updated_at.is_empty());
    }

    #[test]
    fn test_ledger_file_camel_case() {
        let mut ledger = LedgerFile::new();
        ledger.applied.push(AppliedMigration {
            name: "001_init".to_string(),
            applied_at: "2024-01-01T00:00:00+00:00".to_string(),
        });

        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.contains("\"schemaVersion\":1"));
        assert!(json.contains("\"appliedAt\""));
        assert_eq!(ledger.names(), vec!["001_init"]);
        assert!(ledger.contains("001_init"));
    }

    #[test]
    fn test_missing_applied_defaults_to_empty() {
        let ledger: LedgerFile =
            serde_json::from_str(r#"{"schemaVersion":1,"updatedAt":"x"}"#).unwrap();
        assert!(ledger.applied.is_empty());
    }
}

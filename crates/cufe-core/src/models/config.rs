//! Configuration structures for the scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CufeError;

/// Main configuration for the cufe pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CufeConfig {
    /// Directory scanning configuration.
    pub scan: ScanConfig,

    /// Record store configuration.
    pub store: StoreConfig,

    /// Identifier matching configuration.
    pub identifier: IdentifierConfig,

    /// Overwrite confirmation configuration.
    pub prompt: PromptConfig,
}

/// Directory scanning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory containing the invoice PDFs.
    pub source_dir: PathBuf,

    /// File extension of candidate files, matched case-insensitively.
    pub extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("pdf"),
            extension: "pdf".to_string(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file, relative to the working directory unless absolute.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("invoices.db"),
        }
    }
}

/// Bounds on the number of hex characters in an identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Minimum number of hex characters (inclusive).
    pub min_length: usize,

    /// Maximum number of hex characters (inclusive).
    pub max_length: usize,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            min_length: 95,
            max_length: 100,
        }
    }
}

/// What to do when a file already has a stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask on the terminal for each file.
    #[default]
    Ask,
    /// Replace without asking.
    Always,
    /// Keep the stored record without asking.
    Never,
}

/// Overwrite confirmation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Default policy when the command line does not choose one.
    pub overwrite: OverwritePolicy,
}

impl CufeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), CufeError> {
        let IdentifierConfig { min_length, max_length } = self.identifier;
        if min_length == 0 {
            return Err(CufeError::Config(
                "identifier.min_length must be at least 1".to_string(),
            ));
        }
        if min_length > max_length {
            return Err(CufeError::Config(format!(
                "identifier.min_length ({}) is greater than identifier.max_length ({})",
                min_length, max_length
            )));
        }
        if self.scan.extension.trim_start_matches('.').is_empty() {
            return Err(CufeError::Config("scan.extension must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CufeConfig::default();
        assert_eq!(config.identifier.min_length, 95);
        assert_eq!(config.identifier.max_length, 100);
        assert_eq!(config.scan.extension, "pdf");
        assert_eq!(config.store.database_path, PathBuf::from("invoices.db"));
        assert_eq!(config.prompt.overwrite, OverwritePolicy::Ask);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CufeConfig =
            serde_json::from_str(r#"{"identifier": {"max_length": 120}, "prompt": {"overwrite": "never"}}"#)
                .unwrap();
        assert_eq!(config.identifier.min_length, 95);
        assert_eq!(config.identifier.max_length, 120);
        assert_eq!(config.prompt.overwrite, OverwritePolicy::Never);
        assert_eq!(config.scan.source_dir, PathBuf::from("pdf"));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = CufeConfig::default();
        config.identifier.min_length = 101;
        assert!(matches!(config.validate(), Err(CufeError::Config(_))));

        config.identifier.min_length = 0;
        assert!(matches!(config.validate(), Err(CufeError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CufeConfig::default();
        config.scan.source_dir = PathBuf::from("facturas");
        config.save(&path).unwrap();

        let loaded = CufeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.scan.source_dir, PathBuf::from("facturas"));
    }
}

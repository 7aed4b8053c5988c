//! Configuration file support
//!
//! Every field has a default, so a configuration file only needs the keys it
//! changes. Command-line flags are applied on top of the file.

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::Result;
use orthoprof_core::{ProcessingConfig, ProfileColumns};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Column names
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Processing switches
    #[serde(default)]
    pub processing: ProcessingOptions,

    /// Sound inventory
    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Column names of profiles and wordlists
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Profile grapheme column
    pub grapheme: String,
    /// Profile transcription column
    pub transcription: String,
    /// Wordlist form column
    pub form: String,
    /// Wordlist language column
    pub language: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            grapheme: "Grapheme".to_string(),
            transcription: "IPA".to_string(),
            form: "Form".to_string(),
            language: "Language_ID".to_string(),
        }
    }
}

/// Processing switches
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessingOptions {
    /// NFC-normalize profiles and forms
    pub normalize: bool,
    /// Wrap forms in `^...$`
    pub boundaries: bool,
    /// Keep zero-frequency rows on export
    pub keep_zero: bool,
    /// Use the parallel paths when compiled in
    pub parallel: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            boundaries: true,
            keep_zero: false,
            parallel: true,
        }
    }
}

/// Sound inventory location
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Inventory TSV; every sound is accepted when unset
    pub path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = FileReader::read_text(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {}", path.display(), e.message())))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Core processing configuration described by this file
    pub fn processing_config(&self) -> ProcessingConfig {
        ProcessingConfig {
            profile_columns: ProfileColumns {
                grapheme: self.columns.grapheme.clone(),
                transcription: self.columns.transcription.clone(),
            },
            form_column: self.columns.form.clone(),
            language_column: self.columns.language.clone(),
            normalize: self.processing.normalize,
            boundaries: self.processing.boundaries,
            keep_zero: self.processing.keep_zero,
            parallel: self.processing.parallel && cfg!(feature = "parallel"),
            ..ProcessingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
[columns]
transcription = "BIPA"

[processing]
boundaries = false
"#,
        )
        .unwrap();

        assert_eq!(config.columns.transcription, "BIPA");
        assert_eq!(config.columns.grapheme, "Grapheme");
        assert!(!config.processing.boundaries);
        assert!(config.processing.normalize);
        assert!(config.inventory.path.is_none());
    }

    #[test]
    fn test_processing_config_mapping() {
        let mut config = CliConfig::default();
        config.columns.form = "Segments".to_string();
        config.processing.keep_zero = true;

        let processing = config.processing_config();
        assert_eq!(processing.form_column, "Segments");
        assert!(processing.keep_zero);
        assert_eq!(processing.profile_columns.transcription, "IPA");
    }

    #[test]
    fn test_from_file_reports_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orthoprof.toml");
        fs::write(&path, "[processing]\nnormalize = \"yes\"\n").unwrap();

        let error = CliConfig::from_file(&path).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_file_reads_inventory_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orthoprof.toml");
        fs::write(&path, "[inventory]\npath = \"sounds.tsv\"\n").unwrap();

        let config = CliConfig::from_file(&path).unwrap();
        assert_eq!(config.inventory.path, Some(PathBuf::from("sounds.tsv")));
    }
}

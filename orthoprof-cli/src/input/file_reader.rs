//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Checks and reads input files
pub struct FileReader;

impl FileReader {
    /// Fail with [`CliError::FileNotFound`] unless `path` is an existing file
    pub fn require_file(path: &Path) -> Result<()> {
        if path.is_file() {
            Ok(())
        } else {
            Err(CliError::FileNotFound(path.display().to_string()).into())
        }
    }

    /// Read an existing file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        Self::require_file(path)?;
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// File stem of `path`, used as a language identifier
    pub fn stem(path: &Path) -> Result<String> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "cannot derive a language identifier from {}",
                    path.display()
                ))
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("orthoprof.toml");

        let content = "[processing]\nnormalize = false\n";
        fs::write(&file_path, content).unwrap();

        let result = FileReader::read_text(&file_path).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let path = Path::new("/nonexistent/orthoprof.toml");
        let error = FileReader::read_text(path).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_require_file_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileReader::require_file(temp_dir.path()).is_err());
    }

    #[test]
    fn test_stem() {
        assert_eq!(FileReader::stem(Path::new("data/deu.tsv")).unwrap(), "deu");
        assert_eq!(
            FileReader::stem(Path::new("profiles/old_high_german.csv")).unwrap(),
            "old_high_german"
        );
        assert!(FileReader::stem(Path::new("/")).is_err());
    }
}

//! Error types for profile and wordlist handling
//!
//! Segmentation, trimming and consistency checking never fail: a missing
//! match is ordinary control flow. Only reading and writing delimited data
//! can produce a [`ProfileError`].

use thiserror::Error;

/// Errors raised while loading or exporting profiles, wordlists and
/// sound inventories
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A required input file could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path of the file that could not be opened
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A required column is absent from the header row
    #[error("missing required column '{column}' in {source_name}")]
    MissingColumn {
        /// Name of the missing column
        column: String,
        /// Human-readable name of the data source
        source_name: String,
    },

    /// A row has no value for a required column
    #[error("row {line} of {source_name} has no value for column '{column}'")]
    MissingField {
        /// Name of the required column
        column: String,
        /// 1-based line number of the row (header is line 1)
        line: u64,
        /// Human-readable name of the data source
        source_name: String,
    },

    /// A profile row has an empty grapheme
    #[error("row {line} of {source_name} has an empty grapheme")]
    EmptyGrapheme {
        /// 1-based line number of the row
        line: u64,
        /// Human-readable name of the data source
        source_name: String,
    },

    /// Malformed delimited data
    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProfileError {
    pub(crate) fn open(path: &std::path::Path, source: std::io::Error) -> Self {
        ProfileError::Open {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result type for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;

//! Configuration shared by the processing stages

use crate::collector::LanguageFilter;
use crate::delimited::Delimiter;
use crate::profile::{ProfileColumns, ReadOptions, WriteOptions};
use crate::segmenter::SegmentOptions;
use crate::wordlist::WordlistOptions;

/// Settings for reading, processing and writing one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    /// Grapheme and transcription column names
    pub profile_columns: ProfileColumns,
    /// Wordlist form column
    pub form_column: String,
    /// Wordlist language column
    pub language_column: String,
    /// Delimiter of profile files, read and written
    pub profile_delimiter: Delimiter,
    /// Delimiter of wordlist files, read and written
    pub wordlist_delimiter: Delimiter,
    /// NFC-normalize profiles and forms
    pub normalize: bool,
    /// Wrap forms in `^...$`
    pub boundaries: bool,
    /// Keep zero-frequency rules on export
    pub keep_zero: bool,
    /// Use the parallel collection and trimming paths
    pub parallel: bool,
    /// Only collect forms of this language
    pub language: Option<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            profile_columns: ProfileColumns::default(),
            form_column: "Form".to_string(),
            language_column: "Language_ID".to_string(),
            profile_delimiter: Delimiter::Tab,
            wordlist_delimiter: Delimiter::Tab,
            normalize: true,
            boundaries: true,
            keep_zero: false,
            parallel: cfg!(feature = "parallel"),
            language: None,
        }
    }
}

impl ProcessingConfig {
    /// Configuration that takes every form and profile entry literally:
    /// no normalization and no boundary sentinels
    pub fn raw() -> Self {
        Self {
            normalize: false,
            boundaries: false,
            ..Self::default()
        }
    }

    /// Options for reading the profile
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            columns: self.profile_columns.clone(),
            delimiter: self.profile_delimiter,
            normalize: self.normalize,
        }
    }

    /// Options for writing the profile
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            columns: self.profile_columns.clone(),
            delimiter: self.profile_delimiter,
            keep_zero: self.keep_zero,
        }
    }

    /// Options for reading the wordlist; the language column becomes
    /// mandatory when a language filter is set
    pub fn wordlist_options(&self) -> WordlistOptions {
        WordlistOptions {
            form_column: self.form_column.clone(),
            language_column: self.language_column.clone(),
            require_language: self.language.is_some(),
            delimiter: self.wordlist_delimiter,
        }
    }

    /// Segmentation options for word forms
    pub fn segment_options(&self) -> SegmentOptions {
        SegmentOptions {
            normalize: self.normalize,
            boundaries: self.boundaries,
            ..SegmentOptions::default()
        }
    }

    /// Language filter for collection
    pub fn language_filter(&self) -> LanguageFilter {
        match &self.language {
            Some(language) => LanguageFilter::Only(language.clone()),
            None => LanguageFilter::All,
        }
    }
}

//! Orthographic profiles: segmentation, frequency collection and trimming
//!
//! An orthographic profile is a table of grapheme→transcription rules. This
//! crate segments word forms against such a table by greedy longest match,
//! counts how often every rule is used across a wordlist, removes rules the
//! rest of the table already implies, and checks profiles for duplicate,
//! conflicting or unknown entries.
//!
//! ```
//! use orthoprof_core::{Rule, RuleTable, Segmenter};
//!
//! let table: RuleTable = [
//!     Rule::new("^", "NULL"),
//!     Rule::new("$", "NULL"),
//!     Rule::new("sch", "ʃ"),
//!     Rule::new("a", "a"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let segmentation = Segmenter::new(&table).segment("scha");
//! assert_eq!(segmentation.to_string(), "ʃ a");
//! ```

#![warn(missing_docs)]

pub mod checker;
pub mod collector;
pub mod config;
pub mod delimited;
pub mod error;
pub mod processor;
pub mod profile;
pub mod rule;
pub mod segmenter;
pub mod stats;
pub mod table;
pub mod trimmer;
pub mod unicode;
pub mod validator;
pub mod wordlist;

// Re-export key types
pub use checker::{check_consistency, Finding, Severity};
pub use collector::{Collection, FrequencyCollector, LanguageFilter, WordForm};
pub use config::ProcessingConfig;
pub use delimited::Delimiter;
pub use error::{ProfileError, Result};
pub use processor::{
    CollectionReport, NoProgress, ProcessedProfile, ProfileProcessor, ProgressObserver,
};
pub use profile::{write_table, Profile, ProfileColumns, ReadOptions, WriteOptions};
pub use rule::{Rule, NULL_SEGMENT};
pub use segmenter::{SegmentMode, SegmentOptions, Segmentation, Segmenter, Token};
pub use stats::{RuleStats, UsageStats};
pub use table::{MaskedRules, RuleLookup, RuleTable};
pub use trimmer::{try_remove, RuleTrimmer, TrimOutcome};
pub use validator::{OpenInventory, SoundInventory, SoundValidator};
pub use wordlist::{Wordlist, WordlistEntry, WordlistOptions};

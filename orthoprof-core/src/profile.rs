//! Reading and writing orthographic profile files
//!
//! A profile is a delimited table with a header row. Two columns are typed
//! (grapheme and transcription); every other column passes through untouched,
//! except for the columns this crate computes itself:
//!
//! - `FREQUENCY`, `EXAMPLES`, `LANGUAGES` are read back into statistics
//! - `TYPES`, `SCA`, `CODEPOINTS` are recomputed on export and ignored on input

use crate::delimited::{line_of, sanitize, Delimiter, Header};
use crate::error::{ProfileError, Result};
use crate::rule::{collapse_whitespace, Rule};
use crate::stats::RuleStats;
use crate::table::RuleTable;
use crate::unicode::{codepoints, normalize};
use crate::validator::{
    canonical_transcription, transcription_classes, transcription_types, SoundValidator,
};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Rule frequency column
pub const FREQUENCY: &str = "FREQUENCY";
/// Example forms column
pub const EXAMPLES: &str = "EXAMPLES";
/// Language identifiers column
pub const LANGUAGES: &str = "LANGUAGES";
/// Codepoint listing column
pub const CODEPOINTS: &str = "CODEPOINTS";
/// Sound type column
pub const TYPES: &str = "TYPES";
/// Sound class column
pub const SOUND_CLASSES: &str = "SCA";

const DERIVED_COLUMNS: [&str; 3] = [TYPES, SOUND_CLASSES, CODEPOINTS];
const VOLATILE_COLUMNS: [&str; 3] = [FREQUENCY, EXAMPLES, LANGUAGES];

/// Names of the typed profile columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileColumns {
    /// Grapheme column
    pub grapheme: String,
    /// Transcription column
    pub transcription: String,
}

impl Default for ProfileColumns {
    fn default() -> Self {
        Self {
            grapheme: "Grapheme".to_string(),
            transcription: "IPA".to_string(),
        }
    }
}

/// How a profile file is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Typed column names
    pub columns: ProfileColumns,
    /// Field delimiter
    pub delimiter: Delimiter,
    /// NFC-normalize graphemes and transcriptions
    pub normalize: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            columns: ProfileColumns::default(),
            delimiter: Delimiter::Tab,
            normalize: true,
        }
    }
}

/// How a profile file is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Typed column names
    pub columns: ProfileColumns,
    /// Field delimiter
    pub delimiter: Delimiter,
    /// Keep rules whose counted frequency is zero
    pub keep_zero: bool,
}

/// Profile rows exactly as read, repeated graphemes included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Rows in file order
    pub rules: Vec<Rule>,
}

impl Profile {
    /// Read a profile file
    pub fn read_path(path: &Path, options: &ReadOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| ProfileError::open(path, e))?;
        Self::read_from(file, options, &path.display().to_string())
    }

    /// Read a profile from any reader
    pub fn read_from<R: Read>(input: R, options: &ReadOptions, source_name: &str) -> Result<Self> {
        let mut reader = options.delimiter.reader(input);
        let header = Header::read(&mut reader, source_name)?;
        let grapheme_idx = header.require(&options.columns.grapheme)?;
        let transcription_idx = header.require(&options.columns.transcription)?;
        let frequency_idx = header.position(FREQUENCY);
        let examples_idx = header.position(EXAMPLES);
        let languages_idx = header.position(LANGUAGES);

        let extra_columns: Vec<(usize, &String)> = header
            .names()
            .iter()
            .enumerate()
            .filter(|(idx, name)| {
                *idx != grapheme_idx
                    && *idx != transcription_idx
                    && !DERIVED_COLUMNS.contains(&name.as_str())
                    && !VOLATILE_COLUMNS.contains(&name.as_str())
            })
            .collect();

        let mut rules = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut grapheme = header.field(&record, grapheme_idx)?.to_string();
            let mut transcription = header.field(&record, transcription_idx)?.to_string();
            if options.normalize {
                grapheme = normalize(&grapheme);
                transcription = normalize(&transcription);
            }
            if grapheme.is_empty() {
                return Err(ProfileError::EmptyGrapheme {
                    line: line_of(&record),
                    source_name: source_name.to_string(),
                });
            }

            let mut rule = Rule::new(grapheme, transcription);
            for (idx, name) in &extra_columns {
                rule.extra.insert(
                    (*name).clone(),
                    record.get(*idx).unwrap_or_default().to_string(),
                );
            }
            if let Some(idx) = frequency_idx {
                rule.stats = parse_stats(
                    &rule.grapheme,
                    record.get(idx).unwrap_or_default(),
                    examples_idx.and_then(|i| record.get(i)),
                    languages_idx.and_then(|i| record.get(i)),
                );
            }
            rules.push(rule);
        }

        log::debug!("Read {} profile rows from {}", rules.len(), source_name);
        Ok(Self { rules })
    }

    /// Copy with whitespace collapsed and every sound spelled canonically
    pub fn cleaned(&self, validator: &dyn SoundValidator) -> Profile {
        let rules = self
            .rules
            .iter()
            .map(|rule| {
                let mut rule = rule.clone();
                rule.transcription =
                    canonical_transcription(&collapse_whitespace(&rule.transcription), validator);
                rule
            })
            .collect();
        Profile { rules }
    }

    /// Rule table of the rows; the last row of a repeated grapheme wins
    pub fn to_table(&self) -> RuleTable {
        RuleTable::from_rules(self.rules.iter().cloned())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Profile has no rows
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_stats(
    grapheme: &str,
    frequency: &str,
    examples: Option<&str>,
    languages: Option<&str>,
) -> Option<RuleStats> {
    let frequency = frequency.trim();
    if frequency.is_empty() {
        return None;
    }
    let frequency = match frequency.parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            log::warn!(
                "Ignoring unparsable {} value [{}] for grapheme [{}]",
                FREQUENCY,
                frequency,
                grapheme
            );
            return None;
        }
    };

    Some(RuleStats {
        frequency,
        examples: split_list(examples.unwrap_or_default().trim_matches('"')),
        languages: split_list(languages.unwrap_or_default()),
    })
}

fn split_list(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Column order of an exported table
///
/// Grapheme, transcription, `TYPES`, `SCA`, `FREQUENCY`, `CODEPOINTS`, then
/// every other column alphabetically.
pub fn export_columns(table: &RuleTable, columns: &ProfileColumns) -> Vec<String> {
    let mut rest: BTreeSet<String> = table
        .iter()
        .flat_map(|rule| rule.extra.keys().cloned())
        .collect();
    if table.iter().any(|rule| rule.stats.is_some()) {
        rest.insert(EXAMPLES.to_string());
        rest.insert(LANGUAGES.to_string());
    }

    let leading = [
        columns.grapheme.as_str(),
        columns.transcription.as_str(),
        TYPES,
        SOUND_CLASSES,
        FREQUENCY,
        CODEPOINTS,
    ];
    for name in leading {
        rest.remove(name);
    }

    leading
        .iter()
        .map(|name| name.to_string())
        .chain(rest)
        .collect()
}

/// Write `table` as a profile; returns the number of rows written
///
/// Rules counted with zero frequency are omitted unless `keep_zero` is set;
/// rules that were never counted are always written.
pub fn write_table<W: Write>(
    table: &RuleTable,
    validator: &dyn SoundValidator,
    options: &WriteOptions,
    output: W,
) -> Result<usize> {
    let header = export_columns(table, &options.columns);
    let mut writer = options.delimiter.writer(output);
    writer.write_record(&header)?;

    let mut written = 0;
    for rule in table {
        let counted_zero = rule.stats.as_ref().is_some_and(|s| s.frequency == 0);
        if counted_zero && !options.keep_zero {
            continue;
        }

        let row: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(idx, column)| export_cell(rule, idx, column, validator))
            .collect();
        writer.write_record(&row)?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

fn export_cell(rule: &Rule, idx: usize, column: &str, validator: &dyn SoundValidator) -> String {
    match (idx, column) {
        (0, _) => sanitize(&rule.grapheme),
        (1, _) => sanitize(&rule.transcription),
        (_, TYPES) => transcription_types(&rule.transcription, validator),
        (_, SOUND_CLASSES) => transcription_classes(&rule.transcription, validator),
        (_, FREQUENCY) => rule
            .stats
            .as_ref()
            .map(|s| s.frequency.to_string())
            .unwrap_or_default(),
        (_, CODEPOINTS) => codepoints(&rule.grapheme),
        (_, EXAMPLES) => match &rule.stats {
            Some(stats) if !rule.is_sentinel() => {
                sanitize(&stats.example_sample(&rule.grapheme).join(","))
            }
            _ => String::new(),
        },
        (_, LANGUAGES) => rule
            .stats
            .as_ref()
            .map(|s| s.languages.iter().cloned().collect::<Vec<_>>().join(","))
            .unwrap_or_default(),
        (_, other) => rule
            .extra
            .get(other)
            .map(|value| sanitize(value))
            .unwrap_or_default(),
    }
}

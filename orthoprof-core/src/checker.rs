//! Consistency checks over raw profile rows
//!
//! Runs on the rows as read, before a [`RuleTable`](crate::RuleTable) drops
//! repeated graphemes. Every problem becomes a log event and a [`Finding`];
//! nothing is modified and nothing aborts.

use crate::rule::{canonical_sounds, Rule};
use crate::unicode::codepoints;
use crate::validator::SoundValidator;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// One problem found in a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The same grapheme→transcription row appears more than once
    Duplicate {
        /// Repeated grapheme
        grapheme: String,
        /// Its (single) transcription
        transcription: String,
        /// Number of rows
        count: usize,
    },
    /// A grapheme maps to different transcriptions
    Conflict {
        /// Conflicting grapheme
        grapheme: String,
        /// Every transcription given for it, in row order
        transcriptions: Vec<String>,
    },
    /// A transcription uses sounds the inventory does not know
    UnknownSound {
        /// Grapheme of the row
        grapheme: String,
        /// Offending transcription
        transcription: String,
        /// Unknown sounds, in segment order
        sounds: Vec<String>,
    },
}

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Redundant but harmless
    Warning,
    /// Ambiguous or invalid data
    Error,
}

impl Finding {
    /// Grapheme the finding is about
    pub fn grapheme(&self) -> &str {
        match self {
            Finding::Duplicate { grapheme, .. }
            | Finding::Conflict { grapheme, .. }
            | Finding::UnknownSound { grapheme, .. } => grapheme,
        }
    }

    /// Severity of the finding
    pub fn severity(&self) -> Severity {
        match self {
            Finding::Duplicate { .. } => Severity::Warning,
            Finding::Conflict { .. } | Finding::UnknownSound { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Duplicate {
                grapheme, count, ..
            } => write!(
                f,
                "Duplicate (redundant) entry or entries for grapheme [{grapheme}] ({count} rows)."
            ),
            Finding::Conflict {
                grapheme,
                transcriptions,
            } => write!(
                f,
                "Inconsistency for grapheme [{grapheme}]: potential mappings {transcriptions:?}."
            ),
            Finding::UnknownSound {
                grapheme,
                transcription,
                ..
            } => write!(
                f,
                "Mapping [{grapheme}] ({}) -> [{transcription}] ({}) includes at least one unknown sound.",
                codepoints(grapheme),
                codepoints(transcription)
            ),
        }
    }
}

/// Check raw profile rows for duplicates, conflicts and unknown sounds
pub fn check_consistency<'a>(
    rules: impl IntoIterator<Item = &'a Rule>,
    validator: &dyn SoundValidator,
) -> Vec<Finding> {
    let mut mapping: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for rule in rules {
        mapping
            .entry(rule.grapheme.as_str())
            .or_default()
            .push(rule.transcription.as_str());
    }

    let mut findings = Vec::new();
    for (grapheme, transcriptions) in &mapping {
        if let Some(finding) = mapping_finding(grapheme, transcriptions) {
            findings.push(finding);
        }

        let mut distinct: Vec<&str> = Vec::new();
        for &transcription in transcriptions {
            if !distinct.contains(&transcription) {
                distinct.push(transcription);
            }
        }
        findings.extend(
            distinct
                .into_iter()
                .filter_map(|transcription| unknown_sounds(grapheme, transcription, validator)),
        );
    }

    for finding in &findings {
        match finding.severity() {
            Severity::Warning => log::warn!("{finding}"),
            Severity::Error => log::error!("{finding}"),
        }
    }
    findings
}

fn mapping_finding(grapheme: &str, transcriptions: &[&str]) -> Option<Finding> {
    let first = transcriptions.first()?;
    if transcriptions.len() < 2 {
        return None;
    }
    if transcriptions.iter().all(|t| t == first) {
        Some(Finding::Duplicate {
            grapheme: grapheme.to_string(),
            transcription: first.to_string(),
            count: transcriptions.len(),
        })
    } else {
        Some(Finding::Conflict {
            grapheme: grapheme.to_string(),
            transcriptions: transcriptions.iter().map(|t| t.to_string()).collect(),
        })
    }
}

fn unknown_sounds(
    grapheme: &str,
    transcription: &str,
    validator: &dyn SoundValidator,
) -> Option<Finding> {
    let sounds: Vec<String> = canonical_sounds(transcription)
        .into_iter()
        .filter(|sound| validator.is_unknown(sound))
        .map(str::to_string)
        .collect();

    if sounds.is_empty() {
        None
    } else {
        Some(Finding::UnknownSound {
            grapheme: grapheme.to_string(),
            transcription: transcription.to_string(),
            sounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{OpenInventory, SoundInventory};

    fn rows(pairs: &[(&str, &str)]) -> Vec<Rule> {
        pairs.iter().map(|(g, t)| Rule::new(*g, *t)).collect()
    }

    fn inventory() -> SoundInventory {
        let mut inv = SoundInventory::new();
        inv.insert("a", "Vowel", "A");
        inv.insert("b", "Consonant", "P");
        inv
    }

    #[test]
    fn test_conflict_found_once() {
        let rows = rows(&[("x", "a"), ("x", "b")]);
        let findings = check_consistency(&rows, &OpenInventory);

        assert_eq!(
            findings,
            vec![Finding::Conflict {
                grapheme: "x".to_string(),
                transcriptions: vec!["a".to_string(), "b".to_string()],
            }]
        );
    }

    #[test]
    fn test_duplicate_found_once() {
        let rows = rows(&[("x", "a"), ("x", "a"), ("x", "a")]);
        let findings = check_consistency(&rows, &OpenInventory);

        assert_eq!(findings.len(), 1);
        assert!(matches!(
            &findings[0],
            Finding::Duplicate { grapheme, count: 3, .. } if grapheme == "x"
        ));
        assert_eq!(findings[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_unknown_sounds_skip_null_and_left_part() {
        let rows = rows(&[("x", "zz/a NULL"), ("y", "a q")]);
        let findings = check_consistency(&rows, &inventory());

        assert_eq!(findings.len(), 1);
        match &findings[0] {
            Finding::UnknownSound {
                grapheme, sounds, ..
            } => {
                assert_eq!(grapheme, "y");
                assert_eq!(sounds, &vec!["q".to_string()]);
            }
            other => panic!("unexpected finding: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_sound_reported_once_per_distinct_transcription() {
        let rows = rows(&[("x", "q"), ("x", "q")]);
        let findings = check_consistency(&rows, &inventory());

        let unknown = findings
            .iter()
            .filter(|f| matches!(f, Finding::UnknownSound { .. }))
            .count();
        assert_eq!(unknown, 1);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_clean_profile_has_no_findings() {
        let rows = rows(&[("a", "a"), ("b", "b"), ("^", "NULL")]);
        assert!(check_consistency(&rows, &inventory()).is_empty());
    }

    #[test]
    fn test_findings_serialize_with_kind() {
        let finding = Finding::Duplicate {
            grapheme: "x".to_string(),
            transcription: "a".to_string(),
            count: 2,
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["kind"], "duplicate");
        assert_eq!(json["grapheme"], "x");
    }

    #[test]
    fn test_display_includes_codepoints() {
        let finding = Finding::UnknownSound {
            grapheme: "a".to_string(),
            transcription: "q".to_string(),
            sounds: vec!["q".to_string()],
        };
        assert_eq!(
            finding.to_string(),
            "Mapping [a] (U+0061) -> [q] (U+0071) includes at least one unknown sound."
        );
    }
}

//! Sound validation seam
//!
//! Whether a transcription segment is a known sound, and which type and
//! sound class it belongs to, is answered by an external phonological
//! inventory. The core only compares the returned strings.

use crate::delimited::{Delimiter, Header};
use crate::error::{ProfileError, Result};
use crate::rule::{canonical_segment, NULL_SEGMENT};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Type tag reported for sounds the inventory does not know
pub const UNKNOWN_TYPE: &str = "UnknownSound";

/// Sound class reported for sounds the inventory does not know
pub const UNKNOWN_CLASS: &str = "?";

/// Capability of a phonological inventory
pub trait SoundValidator {
    /// Canonical spelling of `sound`
    fn canonicalize(&self, sound: &str) -> String;

    /// Type tag of `sound` (e.g. consonant, vowel)
    fn classify(&self, sound: &str) -> String;

    /// Sound-class label of `sound`
    fn to_sound_class(&self, sound: &str) -> String;

    /// Whether the inventory does not recognize `sound`
    fn is_unknown(&self, sound: &str) -> bool;
}

/// Space-joined type tags of every segment (`NULL` stays `NULL`)
pub fn transcription_types(transcription: &str, validator: &dyn SoundValidator) -> String {
    describe_segments(transcription, |sound| validator.classify(sound))
}

/// Space-joined sound classes of every segment (`NULL` stays `NULL`)
pub fn transcription_classes(transcription: &str, validator: &dyn SoundValidator) -> String {
    describe_segments(transcription, |sound| validator.to_sound_class(sound))
}

/// Transcription with every sound replaced by its canonical spelling
///
/// The `left/` part of `left/right` segments is kept as written.
pub fn canonical_transcription(transcription: &str, validator: &dyn SoundValidator) -> String {
    transcription
        .split_whitespace()
        .map(|segment| {
            if segment == NULL_SEGMENT {
                return segment.to_string();
            }
            match segment.split_once('/') {
                Some((left, right)) => format!("{left}/{}", validator.canonicalize(right)),
                None => validator.canonicalize(segment),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_segments(transcription: &str, describe: impl Fn(&str) -> String) -> String {
    transcription
        .split_whitespace()
        .map(|segment| {
            if segment == NULL_SEGMENT {
                NULL_SEGMENT.to_string()
            } else {
                describe(canonical_segment(segment))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validator that accepts every sound as written
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenInventory;

impl SoundValidator for OpenInventory {
    fn canonicalize(&self, sound: &str) -> String {
        sound.to_string()
    }

    fn classify(&self, _sound: &str) -> String {
        "Sound".to_string()
    }

    fn to_sound_class(&self, _sound: &str) -> String {
        "-".to_string()
    }

    fn is_unknown(&self, _sound: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SoundEntry {
    type_tag: String,
    sound_class: String,
}

/// Table-driven inventory loaded from a delimited file
///
/// Expected columns: `GRAPHEME`, `TYPE`, `SOUND_CLASS` and, optionally,
/// `ALIASES` (space-separated spellings that canonicalize to `GRAPHEME`).
#[derive(Debug, Clone, Default)]
pub struct SoundInventory {
    sounds: HashMap<String, SoundEntry>,
    aliases: HashMap<String, String>,
}

impl SoundInventory {
    /// Empty inventory: every sound is unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sound
    pub fn insert(
        &mut self,
        grapheme: impl Into<String>,
        type_tag: impl Into<String>,
        sound_class: impl Into<String>,
    ) {
        self.sounds.insert(
            grapheme.into(),
            SoundEntry {
                type_tag: type_tag.into(),
                sound_class: sound_class.into(),
            },
        );
    }

    /// Register an alternative spelling of a known sound
    pub fn alias(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(alias.into(), canonical.into());
    }

    /// Number of known sounds
    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    /// Inventory knows no sound
    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    /// Load a tab-delimited inventory file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ProfileError::open(path, e))?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Load a tab-delimited inventory from any reader
    pub fn from_reader<R: std::io::Read>(input: R, source_name: &str) -> Result<Self> {
        let mut reader = Delimiter::Tab.reader(input);
        let header = Header::read(&mut reader, source_name)?;
        let grapheme_idx = header.require("GRAPHEME")?;
        let type_idx = header.require("TYPE")?;
        let class_idx = header.require("SOUND_CLASS")?;
        let alias_idx = header.position("ALIASES");

        let mut inventory = Self::new();
        for record in reader.records() {
            let record = record?;
            let grapheme = header.field(&record, grapheme_idx)?.trim().to_string();
            if grapheme.is_empty() {
                continue;
            }
            let type_tag = header.field(&record, type_idx)?.trim();
            let sound_class = header.field(&record, class_idx)?.trim();
            if let Some(aliases) = alias_idx.and_then(|idx| record.get(idx)) {
                for alias in aliases.split_whitespace() {
                    inventory.alias(alias, grapheme.as_str());
                }
            }
            inventory.insert(grapheme, type_tag, sound_class);
        }

        log::debug!(
            "Loaded {} sounds and {} aliases from {}",
            inventory.sounds.len(),
            inventory.aliases.len(),
            header.source_name()
        );
        Ok(inventory)
    }

    fn entry(&self, sound: &str) -> Option<&SoundEntry> {
        self.sounds.get(sound).or_else(|| {
            self.aliases
                .get(sound)
                .and_then(|canonical| self.sounds.get(canonical))
        })
    }
}

impl SoundValidator for SoundInventory {
    fn canonicalize(&self, sound: &str) -> String {
        if self.sounds.contains_key(sound) {
            return sound.to_string();
        }
        match self.aliases.get(sound) {
            Some(canonical) if self.sounds.contains_key(canonical) => canonical.clone(),
            _ => sound.to_string(),
        }
    }

    fn classify(&self, sound: &str) -> String {
        self.entry(sound)
            .map_or_else(|| UNKNOWN_TYPE.to_string(), |entry| entry.type_tag.clone())
    }

    fn to_sound_class(&self, sound: &str) -> String {
        self.entry(sound)
            .map_or_else(|| UNKNOWN_CLASS.to_string(), |entry| entry.sound_class.clone())
    }

    fn is_unknown(&self, sound: &str) -> bool {
        self.entry(sound).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> SoundInventory {
        let data = "GRAPHEME\tTYPE\tSOUND_CLASS\tALIASES\n\
                    a\tVowel\tA\t\n\
                    tʃ\tConsonant\tK\tč ʧ\n\
                    p\tConsonant\tP\n";
        SoundInventory::from_reader(data.as_bytes(), "inventory").unwrap()
    }

    #[test]
    fn test_known_sounds() {
        let inv = inventory();
        assert_eq!(inv.len(), 3);
        assert!(!inv.is_unknown("a"));
        assert_eq!(inv.classify("tʃ"), "Consonant");
        assert_eq!(inv.to_sound_class("p"), "P");
    }

    #[test]
    fn test_aliases_canonicalize() {
        let inv = inventory();
        assert_eq!(inv.canonicalize("č"), "tʃ");
        assert_eq!(inv.canonicalize("ʧ"), "tʃ");
        assert!(!inv.is_unknown("č"));
        assert_eq!(inv.classify("č"), "Consonant");
    }

    #[test]
    fn test_unknown_sounds() {
        let inv = inventory();
        assert!(inv.is_unknown("ɮ"));
        assert_eq!(inv.canonicalize("ɮ"), "ɮ");
        assert_eq!(inv.classify("ɮ"), UNKNOWN_TYPE);
        assert_eq!(inv.to_sound_class("ɮ"), UNKNOWN_CLASS);
    }

    #[test]
    fn test_missing_inventory_column() {
        let data = "GRAPHEME\tTYPE\na\tVowel\n";
        let err = SoundInventory::from_reader(data.as_bytes(), "inv").unwrap_err();
        assert!(matches!(err, ProfileError::MissingColumn { .. }));
    }

    #[test]
    fn test_transcription_types_and_classes() {
        let inv = inventory();
        assert_eq!(
            transcription_types("c/tʃ a NULL", &inv),
            "Consonant Vowel NULL"
        );
        assert_eq!(transcription_classes("p ɮ", &inv), "P ?");
    }

    #[test]
    fn test_canonical_transcription_keeps_left_part() {
        let inv = inventory();
        assert_eq!(
            canonical_transcription("c/č  ʧ NULL a", &inv),
            "c/tʃ tʃ NULL a"
        );
    }

    #[test]
    fn test_open_inventory_accepts_everything() {
        let open = OpenInventory;
        assert!(!open.is_unknown("anything"));
        assert_eq!(open.canonicalize("x"), "x");
        assert_eq!(transcription_types("x NULL", &open), "Sound NULL");
    }
}

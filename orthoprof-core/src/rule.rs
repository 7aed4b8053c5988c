//! Grapheme rules and transcription segments

use crate::stats::RuleStats;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Transcription segment that consumes its grapheme without emitting anything
pub const NULL_SEGMENT: &str = "NULL";

/// Start-of-form sentinel
pub const START_SENTINEL: char = '^';

/// End-of-form sentinel
pub const END_SENTINEL: char = '$';

/// One grapheme→transcription rule of an orthographic profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Orthographic unit matched against word forms
    pub grapheme: String,
    /// Transcription as written in the profile
    pub transcription: String,
    /// Usage statistics, `None` when the rule was never counted
    pub stats: Option<RuleStats>,
    /// Free-form pass-through columns, in header order
    pub extra: IndexMap<String, String>,
}

impl Rule {
    /// Create a rule; the transcription is kept verbatim
    pub fn new(grapheme: impl Into<String>, transcription: impl Into<String>) -> Self {
        Self {
            grapheme: grapheme.into(),
            transcription: transcription.into(),
            stats: None,
            extra: IndexMap::new(),
        }
    }

    /// Attach a pass-through column
    pub fn with_column(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Attach usage statistics
    pub fn with_stats(mut self, stats: RuleStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Transcription segments, `NULL` included
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.transcription.split_whitespace()
    }

    /// Canonical sounds of the transcription (see [`canonical_sounds`])
    pub fn sounds(&self) -> SmallVec<[&str; 4]> {
        canonical_sounds(&self.transcription)
    }

    /// Grapheme length in characters
    pub fn char_len(&self) -> usize {
        self.grapheme.chars().count()
    }

    /// `^...$` grapheme spanning a whole form
    pub fn is_fully_bounded(&self) -> bool {
        self.char_len() > 1
            && self.grapheme.starts_with(START_SENTINEL)
            && self.grapheme.ends_with(END_SENTINEL)
    }

    /// Grapheme anchored at the end of a form only
    pub fn is_right_bounded(&self) -> bool {
        !self.grapheme.starts_with(START_SENTINEL) && self.grapheme.ends_with(END_SENTINEL)
    }

    /// Bare `^` or `$` rule
    pub fn is_sentinel(&self) -> bool {
        self.grapheme == "^" || self.grapheme == "$"
    }

    /// Transcription is exactly `NULL`
    pub fn is_null(&self) -> bool {
        self.transcription == NULL_SEGMENT
    }

    /// Frequency, or zero when never counted
    pub fn frequency(&self) -> u64 {
        self.stats.as_ref().map_or(0, |s| s.frequency)
    }
}

/// Canonical part of a segment: `right` for `left/right`, the segment itself
/// otherwise
pub fn canonical_segment(segment: &str) -> &str {
    match segment.split_once('/') {
        Some((_, right)) => right,
        None => segment,
    }
}

/// Canonical sounds of a transcription, skipping `NULL` and empty segments
pub fn canonical_sounds(transcription: &str) -> SmallVec<[&str; 4]> {
    transcription
        .split_whitespace()
        .map(canonical_segment)
        .filter(|sound| !sound.is_empty() && *sound != NULL_SEGMENT)
        .collect()
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

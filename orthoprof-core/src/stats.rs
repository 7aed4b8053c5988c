//! Per-rule usage statistics
//!
//! Statistics live apart from the rule lookup: a segmentation pass reads an
//! immutable table and records matches into a [`UsageStats`] map, which is
//! installed into a cloned table once the pass is over.

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashMap};

/// Number of examples kept when a rule is exported
pub const EXAMPLE_SAMPLE_SIZE: usize = 3;

/// Usage counters of a single rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleStats {
    /// Number of times the rule fired
    pub frequency: u64,
    /// Distinct forms in which the rule fired
    pub examples: BTreeSet<String>,
    /// Distinct language identifiers in which the rule fired
    pub languages: BTreeSet<String>,
}

impl RuleStats {
    /// Record one firing of the rule
    pub fn record(&mut self, form: &str, language: &str) {
        self.frequency += 1;
        if !self.examples.contains(form) {
            self.examples.insert(form.to_string());
        }
        if !self.languages.contains(language) {
            self.languages.insert(language.to_string());
        }
    }

    /// Fold another set of counters into this one
    pub fn merge(&mut self, other: RuleStats) {
        self.frequency += other.frequency;
        self.examples.extend(other.examples);
        self.languages.extend(other.languages);
    }

    /// Reproducible sample of at most `EXAMPLE_SAMPLE_SIZE` examples, sorted
    ///
    /// The generator is seeded from the grapheme, so identical input always
    /// yields the identical sample.
    pub fn example_sample(&self, grapheme: &str) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(grapheme_seed(grapheme));
        let mut sample: Vec<String> = self
            .examples
            .iter()
            .cloned()
            .choose_multiple(&mut rng, EXAMPLE_SAMPLE_SIZE);
        sample.sort();
        sample
    }
}

/// Statistics of one segmentation pass, keyed by grapheme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageStats {
    by_grapheme: HashMap<String, RuleStats>,
}

impl UsageStats {
    /// Empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match of `grapheme` in `form`
    pub fn record(&mut self, grapheme: &str, form: &str, language: &str) {
        match self.by_grapheme.get_mut(grapheme) {
            Some(stats) => stats.record(form, language),
            None => {
                let mut stats = RuleStats::default();
                stats.record(form, language);
                self.by_grapheme.insert(grapheme.to_string(), stats);
            }
        }
    }

    /// Counters for `grapheme`, if it ever matched
    pub fn get(&self, grapheme: &str) -> Option<&RuleStats> {
        self.by_grapheme.get(grapheme)
    }

    /// Frequency of `grapheme`, zero if it never matched
    pub fn frequency(&self, grapheme: &str) -> u64 {
        self.get(grapheme).map_or(0, |s| s.frequency)
    }

    /// Fold another pass into this one
    pub fn merge(mut self, other: UsageStats) -> Self {
        for (grapheme, stats) in other.by_grapheme {
            self.by_grapheme.entry(grapheme).or_default().merge(stats);
        }
        self
    }

    /// Remove and return the counters for `grapheme`
    pub fn take(&mut self, grapheme: &str) -> Option<RuleStats> {
        self.by_grapheme.remove(grapheme)
    }

    /// Number of graphemes that matched at least once
    pub fn len(&self) -> usize {
        self.by_grapheme.len()
    }

    /// No grapheme matched
    pub fn is_empty(&self) -> bool {
        self.by_grapheme.is_empty()
    }
}

/// FNV-1a over the grapheme bytes
fn grapheme_seed(grapheme: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    grapheme
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

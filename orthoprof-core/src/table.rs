//! Ordered rule tables and read-only lookup views

use crate::rule::{Rule, END_SENTINEL, NULL_SEGMENT, START_SENTINEL};
use crate::stats::UsageStats;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Read-only grapheme lookup consulted by the segmenter
pub trait RuleLookup {
    /// Rule keyed by exactly `grapheme`
    fn lookup(&self, grapheme: &str) -> Option<&Rule>;

    /// Upper bound on the character length of any grapheme visible through
    /// this lookup
    fn longest_grapheme(&self) -> usize;
}

/// Ordered grapheme→rule mapping with unique keys
///
/// Insertion order is kept so exported profiles diff cleanly; lookups go
/// through the hash index of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: IndexMap<String, Rule>,
    longest: usize,
}

impl RuleTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows that may repeat graphemes; the last row for
    /// a grapheme wins and keeps the position of the first
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut table = Self::new();
        for rule in rules {
            if let Some(replaced) = table.insert(rule) {
                log::debug!(
                    "Replacing repeated row for grapheme [{}] -> [{}]",
                    replaced.grapheme,
                    replaced.transcription
                );
            }
        }
        table
    }

    /// Insert a rule, replacing any rule with the same grapheme in place;
    /// returns the replaced rule
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        self.longest = self.longest.max(rule.char_len());
        self.rules.insert(rule.grapheme.clone(), rule)
    }

    /// Rule for `grapheme`
    pub fn get(&self, grapheme: &str) -> Option<&Rule> {
        self.rules.get(grapheme)
    }

    /// Whether `grapheme` is a key
    pub fn contains(&self, grapheme: &str) -> bool {
        self.rules.contains_key(grapheme)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in table order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Graphemes in table order
    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Copy of the table without `grapheme`, order of the rest preserved
    pub fn without(&self, grapheme: &str) -> RuleTable {
        self.filtered(|rule| rule.grapheme != grapheme)
    }

    /// Copy of the table keeping only rules accepted by `keep`
    pub fn filtered(&self, mut keep: impl FnMut(&Rule) -> bool) -> RuleTable {
        RuleTable::from_rules(self.iter().filter(|rule| keep(rule)).cloned())
    }

    /// Copy of the table with every rule's statistics cleared
    pub fn without_stats(&self) -> RuleTable {
        let rules = self.rules.values().map(|rule| Rule {
            stats: None,
            ..rule.clone()
        });
        RuleTable::from_rules(rules)
    }

    /// View of the table hiding every grapheme in `hidden`
    pub fn masked<'a>(&'a self, hidden: &'a HashSet<String>) -> MaskedRules<'a> {
        MaskedRules {
            table: self,
            hidden,
            skip: None,
        }
    }

    /// Copy of the table whose rules carry the counters of `usage`
    ///
    /// Every rule gets statistics: rules that never matched are reset to zero.
    pub fn with_usage(&self, mut usage: UsageStats) -> RuleTable {
        let rules = self.rules.values().map(|rule| {
            let mut rule = rule.clone();
            rule.stats = Some(usage.take(&rule.grapheme).unwrap_or_default());
            rule
        });
        RuleTable::from_rules(rules)
    }

    /// Copy of the table in canonical profile order
    ///
    /// `^` and `$` first, then `NULL` rules, then `^...$` full forms, then by
    /// character length and finally by grapheme.
    pub fn sorted(&self) -> RuleTable {
        let mut rules: Vec<&Rule> = self.iter().collect();
        rules.sort_by_cached_key(|rule| {
            (
                !rule.is_sentinel(),
                rule.grapheme != "^",
                rule.transcription != NULL_SEGMENT,
                !(rule.grapheme.starts_with(START_SENTINEL)
                    && rule.grapheme.ends_with(END_SENTINEL)),
                rule.char_len(),
                rule.grapheme.clone(),
            )
        });
        RuleTable::from_rules(rules.into_iter().cloned())
    }
}

impl RuleLookup for RuleTable {
    fn lookup(&self, grapheme: &str) -> Option<&Rule> {
        self.rules.get(grapheme)
    }

    fn longest_grapheme(&self) -> usize {
        self.longest
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = indexmap::map::Values<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.values()
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        RuleTable::from_rules(iter)
    }
}

/// A [`RuleTable`] with some graphemes hidden, without copying it
#[derive(Debug, Clone, Copy)]
pub struct MaskedRules<'a> {
    table: &'a RuleTable,
    hidden: &'a HashSet<String>,
    skip: Option<&'a str>,
}

impl<'a> MaskedRules<'a> {
    /// Additionally hide a single grapheme
    pub fn skipping(self, grapheme: &'a str) -> Self {
        Self {
            skip: Some(grapheme),
            ..self
        }
    }

    fn is_hidden(&self, grapheme: &str) -> bool {
        self.skip == Some(grapheme) || self.hidden.contains(grapheme)
    }
}

impl RuleLookup for MaskedRules<'_> {
    fn lookup(&self, grapheme: &str) -> Option<&Rule> {
        if self.is_hidden(grapheme) {
            return None;
        }
        self.table.lookup(grapheme)
    }

    fn longest_grapheme(&self) -> usize {
        self.table.longest_grapheme()
    }
}

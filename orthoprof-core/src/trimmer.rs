//! Removal of redundant rules
//!
//! A rule is redundant when segmenting its own grapheme against the rest of
//! the table already yields its transcription. Candidates are visited most
//! anchored first:
//!
//! 1. `^...$` graphemes
//! 2. `...$` graphemes
//! 3. other multi-character graphemes, longest first
//! 4. single characters
//!
//! Removing one rule can expose another, so passes repeat until one removes
//! nothing. The visiting order is a greedy heuristic: a different order can
//! leave a different, equally valid, set of rules.

use crate::rule::Rule;
use crate::segmenter::Segmenter;
use crate::table::{RuleLookup, RuleTable};
use crate::unicode::codepoints;
use std::collections::HashSet;

/// Result of trimming a table to its fixpoint
#[derive(Debug, Clone)]
pub struct TrimOutcome {
    /// Surviving rules, in their original order
    pub table: RuleTable,
    /// Removed graphemes, in removal order
    pub removed: Vec<String>,
    /// Number of passes run, including the final one that removed nothing
    pub passes: usize,
}

impl TrimOutcome {
    /// Total number of removed rules
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Graphemes of `table` in the order they are tested for removal
pub fn candidate_order(table: &RuleTable) -> Vec<&str> {
    let mut fully_bounded = Vec::new();
    let mut right_bounded = Vec::new();
    let mut multi_char = Vec::new();
    let mut single_char = Vec::new();

    for rule in table {
        if rule.is_fully_bounded() {
            fully_bounded.push(rule);
        } else if rule.is_right_bounded() {
            right_bounded.push(rule);
        } else if rule.char_len() > 1 {
            multi_char.push(rule);
        } else {
            single_char.push(rule);
        }
    }
    multi_char.sort_by_key(|rule| std::cmp::Reverse(rule.char_len()));

    fully_bounded
        .into_iter()
        .chain(right_bounded)
        .chain(multi_char)
        .chain(single_char)
        .map(|rule| rule.grapheme.as_str())
        .collect()
}

/// Whether `rest` alone reproduces the transcription of `rule`
///
/// The grapheme is segmented verbatim (it already carries its sentinels) and
/// the tokens are joined with single spaces before the exact comparison.
pub fn is_redundant<L: RuleLookup + ?Sized>(rule: &Rule, rest: &L) -> bool {
    Segmenter::new(rest)
        .segment_verbatim(&rule.grapheme)
        .to_string()
        == rule.transcription
}

/// Remove `grapheme` from a copy of `table` if the rest of the table makes it
/// redundant
///
/// Returns the resulting table and whether the rule was removed; the input is
/// never modified.
pub fn try_remove(table: &RuleTable, grapheme: &str) -> (RuleTable, bool) {
    let Some(rule) = table.get(grapheme) else {
        return (table.clone(), false);
    };
    let hidden = HashSet::new();
    if is_redundant(rule, &table.masked(&hidden).skipping(grapheme)) {
        (table.without(grapheme), true)
    } else {
        (table.clone(), false)
    }
}

/// Fixpoint trimming driver
#[derive(Debug, Clone, Copy)]
pub struct RuleTrimmer {
    parallel: bool,
}

impl Default for RuleTrimmer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTrimmer {
    /// Trimmer using the parallel pass when the `parallel` feature is on
    pub fn new() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Allow parallel candidate evaluation (no effect without the `parallel`
    /// feature)
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Trim `table` until a pass removes nothing
    pub fn trim(&self, table: &RuleTable) -> TrimOutcome {
        self.trim_with(table, &|_, _| {})
    }

    /// Trim `table`, calling `on_pass(pass, removed_in_pass)` after each pass
    pub fn trim_with(&self, table: &RuleTable, on_pass: &dyn Fn(usize, usize)) -> TrimOutcome {
        let mut current = table.clone();
        let mut removed = Vec::new();
        let mut passes = 0;

        loop {
            passes += 1;
            let (next, pass_removed) = self.pass(&current);
            on_pass(passes, pass_removed.len());
            log::debug!("Trim pass {} removed {} rules", passes, pass_removed.len());

            if pass_removed.is_empty() {
                break;
            }
            removed.extend(pass_removed);
            current = next;
        }

        TrimOutcome {
            table: current,
            removed,
            passes,
        }
    }

    /// One full pass over `table`; returns the surviving rules and the
    /// graphemes removed
    pub fn pass(&self, table: &RuleTable) -> (RuleTable, Vec<String>) {
        let order = candidate_order(table);
        let removed = if self.parallel {
            speculative_pass(table, &order)
        } else {
            sequential_pass(table, &order)
        };

        let hidden: HashSet<&str> = removed.iter().map(String::as_str).collect();
        let survivors = table.filtered(|rule| !hidden.contains(rule.grapheme.as_str()));
        (survivors, removed)
    }
}

fn sequential_pass(table: &RuleTable, order: &[&str]) -> Vec<String> {
    let mut hidden = HashSet::new();
    let mut removed = Vec::new();

    for &grapheme in order {
        let Some(rule) = table.get(grapheme) else {
            continue;
        };
        let redundant = is_redundant(rule, &table.masked(&hidden).skipping(grapheme));
        if redundant {
            report_removal(rule);
            hidden.insert(grapheme.to_string());
            removed.push(grapheme.to_string());
        }
    }

    removed
}

/// Evaluates the remaining candidates in parallel against the current
/// reduction and applies only the first redundant one in priority order, then
/// resumes after it; the outcome equals [`sequential_pass`].
#[cfg(feature = "parallel")]
fn speculative_pass(table: &RuleTable, order: &[&str]) -> Vec<String> {
    use rayon::prelude::*;

    let mut hidden = HashSet::new();
    let mut removed = Vec::new();
    let mut start = 0;

    while start < order.len() {
        let found = order[start..].par_iter().position_first(|&grapheme| {
            table
                .get(grapheme)
                .is_some_and(|rule| is_redundant(rule, &table.masked(&hidden).skipping(grapheme)))
        });

        let Some(offset) = found else {
            break;
        };
        let grapheme = order[start + offset];
        if let Some(rule) = table.get(grapheme) {
            report_removal(rule);
        }
        hidden.insert(grapheme.to_string());
        removed.push(grapheme.to_string());
        start += offset + 1;
    }

    removed
}

#[cfg(not(feature = "parallel"))]
fn speculative_pass(table: &RuleTable, order: &[&str]) -> Vec<String> {
    sequential_pass(table, order)
}

fn report_removal(rule: &Rule) {
    log::info!(
        "Rule for grapheme [{}] ({}) is superfluous, removing it...",
        rule.grapheme,
        codepoints(&rule.grapheme)
    );
}

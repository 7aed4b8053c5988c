//! Frequency collection over a wordlist
//!
//! Every form is segmented once against an immutable table; matches are
//! recorded into a fresh [`UsageStats`] which is installed into a copy of the
//! table at the end, so all counters start from zero on every run.

use crate::segmenter::{SegmentMode, SegmentOptions, Segmentation, Segmenter};
use crate::stats::UsageStats;
use crate::table::RuleTable;

/// Wordlists smaller than this are always collected sequentially
pub const PARALLEL_MIN_FORMS: usize = 512;

/// One `(form, language)` pair of a wordlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordForm {
    /// Raw word form
    pub form: String,
    /// Language identifier, empty when unknown
    pub language: String,
}

impl WordForm {
    /// Create a word form
    pub fn new(form: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            language: language.into(),
        }
    }
}

/// Which word forms take part in a collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    /// Every form
    #[default]
    All,
    /// Only forms of this language identifier
    Only(String),
}

impl LanguageFilter {
    /// Whether forms of `language` are collected
    pub fn accepts(&self, language: &str) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(target) => target == language,
        }
    }
}

/// Result of a collection run
#[derive(Debug, Clone)]
pub struct Collection {
    /// Copy of the input table carrying the new counters
    pub table: RuleTable,
    /// Trace segmentation of every collected form with its input index,
    /// in input order; empty unless auditing was requested
    pub traces: Vec<(usize, Segmentation)>,
    /// Number of forms segmented
    pub processed: usize,
    /// Number of forms rejected by the language filter
    pub skipped: usize,
}

/// Drives the segmenter across a wordlist
#[derive(Debug, Clone)]
pub struct FrequencyCollector<'t> {
    table: &'t RuleTable,
    options: SegmentOptions,
    filter: LanguageFilter,
    audit: bool,
    parallel: bool,
}

impl<'t> FrequencyCollector<'t> {
    /// Collector with default segmentation options and no filtering
    pub fn new(table: &'t RuleTable) -> Self {
        Self {
            table,
            options: SegmentOptions::default(),
            filter: LanguageFilter::All,
            audit: false,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Set segmentation options; the token mode is chosen by [`Self::audit`]
    pub fn options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }

    /// Restrict collection to one language
    pub fn filter(mut self, filter: LanguageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Keep the trace segmentation of every collected form
    pub fn audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// Allow parallel collection (no effect without the `parallel` feature)
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Collect statistics for `forms`
    pub fn collect(&self, forms: &[WordForm]) -> Collection {
        self.collect_with(forms, &|| {})
    }

    /// Collect statistics for `forms`, calling `tick` once per segmented form
    pub fn collect_with(&self, forms: &[WordForm], tick: &(dyn Fn() + Sync)) -> Collection {
        let selected: Vec<(usize, &WordForm)> = forms
            .iter()
            .enumerate()
            .filter(|(_, word)| self.filter.accepts(&word.language))
            .collect();
        let skipped = forms.len() - selected.len();
        if skipped > 0 {
            log::debug!("Language filter skipped {} of {} forms", skipped, forms.len());
        }

        let mode = if self.audit {
            SegmentMode::Trace
        } else {
            SegmentMode::Plain
        };
        let segmenter = Segmenter::with_options(self.table, self.options.with_mode(mode));

        let (usage, traces) = if self.parallel && selected.len() >= PARALLEL_MIN_FORMS {
            self.run_parallel(&segmenter, &selected, tick)
        } else {
            self.run_sequential(&segmenter, &selected, tick)
        };

        Collection {
            table: self.table.with_usage(usage),
            traces,
            processed: selected.len(),
            skipped,
        }
    }

    fn run_sequential(
        &self,
        segmenter: &Segmenter<'_, RuleTable>,
        selected: &[(usize, &WordForm)],
        tick: &(dyn Fn() + Sync),
    ) -> (UsageStats, Vec<(usize, Segmentation)>) {
        let mut usage = UsageStats::new();
        let mut traces = Vec::new();
        for (idx, word) in selected {
            let segmentation = segment_one(segmenter, *idx, word, &mut usage);
            if self.audit {
                traces.push((*idx, segmentation));
            }
            tick();
        }
        (usage, traces)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(
        &self,
        segmenter: &Segmenter<'_, RuleTable>,
        selected: &[(usize, &WordForm)],
        tick: &(dyn Fn() + Sync),
    ) -> (UsageStats, Vec<(usize, Segmentation)>) {
        use rayon::prelude::*;

        let audit = self.audit;
        let (usage, mut traces) = selected
            .par_iter()
            .fold(
                || (UsageStats::new(), Vec::new()),
                |(mut usage, mut traces), (idx, word)| {
                    let segmentation = segment_one(segmenter, *idx, word, &mut usage);
                    if audit {
                        traces.push((*idx, segmentation));
                    }
                    tick();
                    (usage, traces)
                },
            )
            .reduce(
                || (UsageStats::new(), Vec::new()),
                |(left, mut left_traces), (right, right_traces)| {
                    left_traces.extend(right_traces);
                    (left.merge(right), left_traces)
                },
            );

        traces.sort_by_key(|(idx, _)| *idx);
        (usage, traces)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(
        &self,
        segmenter: &Segmenter<'_, RuleTable>,
        selected: &[(usize, &WordForm)],
        tick: &(dyn Fn() + Sync),
    ) -> (UsageStats, Vec<(usize, Segmentation)>) {
        self.run_sequential(segmenter, selected, tick)
    }
}

fn segment_one(
    segmenter: &Segmenter<'_, RuleTable>,
    idx: usize,
    word: &WordForm,
    usage: &mut UsageStats,
) -> Segmentation {
    let segmentation = segmenter.segment_counted(&word.form, &word.language, usage);
    log::trace!("#{} [{}] ({}): {}", idx, word.form, word.language, segmentation);
    segmentation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    fn table() -> RuleTable {
        [("a", "a"), ("b", "b"), ("ab", "p"), ("^", "NULL"), ("$", "NULL")]
            .iter()
            .map(|(g, t)| Rule::new(*g, *t))
            .collect()
    }

    fn forms() -> Vec<WordForm> {
        vec![
            WordForm::new("ab", "l1"),
            WordForm::new("ba", "l2"),
            WordForm::new("aa", "l1"),
        ]
    }

    #[test]
    fn test_collect_counts_frequencies() {
        let table = table();
        let collection = FrequencyCollector::new(&table).collect(&forms());

        let counted = &collection.table;
        assert_eq!(counted.get("ab").unwrap().frequency(), 1);
        assert_eq!(counted.get("a").unwrap().frequency(), 3);
        assert_eq!(counted.get("b").unwrap().frequency(), 1);
        assert_eq!(counted.get("^").unwrap().frequency(), 3);
        assert_eq!(collection.processed, 3);
        assert_eq!(collection.skipped, 0);
    }

    #[test]
    fn test_collect_leaves_input_table_untouched() {
        let table = table();
        let _ = FrequencyCollector::new(&table).collect(&forms());
        assert!(table.iter().all(|rule| rule.stats.is_none()));
    }

    #[test]
    fn test_collect_resets_previous_counts() {
        let table = table();
        let first = FrequencyCollector::new(&table).collect(&forms()).table;
        let second = FrequencyCollector::new(&first)
            .collect(&[WordForm::new("b", "l1")])
            .table;

        assert_eq!(second.get("a").unwrap().frequency(), 0);
        assert_eq!(second.get("b").unwrap().frequency(), 1);
    }

    #[test]
    fn test_language_filter() {
        let table = table();
        let collection = FrequencyCollector::new(&table)
            .filter(LanguageFilter::Only("l1".to_string()))
            .collect(&forms());

        assert_eq!(collection.processed, 2);
        assert_eq!(collection.skipped, 1);
        let b = collection.table.get("b").unwrap();
        assert_eq!(b.frequency(), 0);
        let a = collection.table.get("a").unwrap();
        let stats = a.stats.as_ref().unwrap();
        assert_eq!(stats.languages.iter().collect::<Vec<_>>(), vec!["l1"]);
    }

    #[test]
    fn test_audit_keeps_traces_in_input_order() {
        let table = table();
        let collection = FrequencyCollector::new(&table)
            .filter(LanguageFilter::Only("l1".to_string()))
            .audit(true)
            .collect(&forms());

        let indices: Vec<_> = collection.traces.iter().map(|(idx, _)| *idx).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(
            collection.traces[0].1.to_string(),
            "{^}/{NULL} {ab}/{p} {$}/{NULL}"
        );
    }

    #[test]
    fn test_no_traces_without_audit() {
        let table = table();
        let collection = FrequencyCollector::new(&table).collect(&forms());
        assert!(collection.traces.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let table = table();
        let words: Vec<WordForm> = (0..PARALLEL_MIN_FORMS * 2)
            .map(|i| {
                let form = if i % 3 == 0 { "abba" } else { "ba" };
                WordForm::new(format!("{form}{}", "a".repeat(i % 5)), format!("l{}", i % 4))
            })
            .collect();

        let sequential = FrequencyCollector::new(&table)
            .parallel(false)
            .audit(true)
            .collect(&words);
        let parallel = FrequencyCollector::new(&table)
            .parallel(true)
            .audit(true)
            .collect(&words);

        assert_eq!(sequential.table, parallel.table);
        assert_eq!(sequential.traces, parallel.traces);
    }

    #[test]
    fn test_tick_called_per_form() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let table = table();
        let ticks = AtomicUsize::new(0);
        FrequencyCollector::new(&table).collect_with(&forms(), &|| {
            ticks.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(ticks.load(Ordering::Relaxed), 3);
    }
}

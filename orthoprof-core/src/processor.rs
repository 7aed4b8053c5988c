//! Profile processing pipelines
//!
//! [`ProfileProcessor`] is the entry point the command line drives. It
//! strings the stages together in a fixed order and reports progress through
//! a [`ProgressObserver`]:
//!
//! - format: clean, check, dedupe, collect (optional), sort
//! - trim: check, dedupe, trim to fixpoint, collect (optional)
//! - check: consistency findings only

use crate::checker::{check_consistency, Finding};
use crate::collector::FrequencyCollector;
use crate::config::ProcessingConfig;
use crate::profile::Profile;
use crate::segmenter::Segmentation;
use crate::table::RuleTable;
use crate::trimmer::RuleTrimmer;
use crate::validator::SoundValidator;
use crate::wordlist::Wordlist;

/// Receives progress notifications from a running pipeline
///
/// Every method has an empty default, so implementors pick what they show.
pub trait ProgressObserver: Sync {
    /// Collection over `forms` word forms is starting
    fn collection_started(&self, _forms: usize) {}

    /// One more form was segmented
    fn form_segmented(&self) {}

    /// Collection has finished
    fn collection_finished(&self) {}

    /// A trimming pass finished, removing `removed` rules
    fn trim_pass(&self, _pass: usize, _removed: usize) {}

    /// Trimming has reached its fixpoint
    fn trim_finished(&self, _removed: usize) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Summary of a frequency collection
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// Forms segmented
    pub processed: usize,
    /// Forms rejected by the language filter
    pub skipped: usize,
    /// Trace segmentations by wordlist row, empty unless auditing
    pub traces: Vec<(usize, Segmentation)>,
}

/// Output of a pipeline run
#[derive(Debug, Clone)]
pub struct ProcessedProfile {
    /// Resulting rule table, ready for export
    pub table: RuleTable,
    /// Consistency findings on the input rows
    pub findings: Vec<Finding>,
    /// Graphemes removed by trimming, in removal order
    pub removed: Vec<String>,
    /// Trimming passes run, zero when not trimming
    pub passes: usize,
    /// Collection summary when a wordlist was given
    pub collection: Option<CollectionReport>,
}

/// Runs the format, trim and check pipelines
pub struct ProfileProcessor<'v> {
    config: ProcessingConfig,
    validator: &'v dyn SoundValidator,
    audit: bool,
}

impl<'v> ProfileProcessor<'v> {
    /// Create a processor
    pub fn new(config: ProcessingConfig, validator: &'v dyn SoundValidator) -> Self {
        Self {
            config,
            validator,
            audit: false,
        }
    }

    /// Keep per-form trace segmentations for a debug wordlist
    pub fn audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Consistency findings of the raw rows
    pub fn check(&self, profile: &Profile) -> Vec<Finding> {
        check_consistency(&profile.rules, self.validator)
    }

    /// Clean, check, dedupe, optionally collect, then sort
    pub fn format(
        &self,
        profile: &Profile,
        wordlist: Option<&Wordlist>,
        progress: &dyn ProgressObserver,
    ) -> ProcessedProfile {
        log::info!("Cleaning profile...");
        let cleaned = profile.cleaned(self.validator);
        let findings = self.check(&cleaned);
        let mut table = cleaned.to_table();

        let collection = wordlist.map(|wordlist| {
            let (counted, report) = self.collect(&table, wordlist, progress);
            table = counted;
            report
        });

        ProcessedProfile {
            table: table.sorted(),
            findings,
            removed: Vec::new(),
            passes: 0,
            collection,
        }
    }

    /// Check, dedupe, trim to fixpoint, then optionally collect
    pub fn trim(
        &self,
        profile: &Profile,
        wordlist: Option<&Wordlist>,
        progress: &dyn ProgressObserver,
    ) -> ProcessedProfile {
        let findings = self.check(profile);
        let table = profile.to_table();

        log::info!("Trimming {} rules...", table.len());
        let outcome = RuleTrimmer::new()
            .parallel(self.config.parallel)
            .trim_with(&table, &|pass, removed| progress.trim_pass(pass, removed));
        progress.trim_finished(outcome.removed_count());
        log::info!(
            "{} superfluous rules were removed.",
            outcome.removed_count()
        );

        // Input counts do not survive trimming
        let mut table = outcome.table.without_stats();
        let collection = wordlist.map(|wordlist| {
            let (counted, report) = self.collect(&table, wordlist, progress);
            table = counted;
            report
        });

        ProcessedProfile {
            table,
            findings,
            removed: outcome.removed,
            passes: outcome.passes,
            collection,
        }
    }

    fn collect(
        &self,
        table: &RuleTable,
        wordlist: &Wordlist,
        progress: &dyn ProgressObserver,
    ) -> (RuleTable, CollectionReport) {
        let forms = wordlist.forms();
        progress.collection_started(forms.len());

        let collection = FrequencyCollector::new(table)
            .options(self.config.segment_options())
            .filter(self.config.language_filter())
            .audit(self.audit)
            .parallel(self.config.parallel)
            .collect_with(&forms, &|| progress.form_segmented());
        progress.collection_finished();
        log::info!(
            "Segmented {} forms ({} skipped by language filter)",
            collection.processed,
            collection.skipped
        );

        let report = CollectionReport {
            processed: collection.processed,
            skipped: collection.skipped,
            traces: collection.traces,
        };
        (collection.table, report)
    }
}

//! Progress reporting module

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use orthoprof_core::ProgressObserver;
use std::time::Duration;

/// Progress bars on stderr for frequency collection and trimming
pub struct ProgressReporter {
    collect_bar: ProgressBar,
    trim_bar: ProgressBar,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter; a quiet reporter draws nothing
    pub fn new(quiet: bool) -> Self {
        Self {
            collect_bar: ProgressBar::hidden(),
            trim_bar: ProgressBar::hidden(),
            quiet,
        }
    }

    fn show(&self, bar: &ProgressBar, style: ProgressStyle) {
        if self.quiet {
            return;
        }
        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
    }
}

impl ProgressObserver for ProgressReporter {
    fn collection_started(&self, forms: usize) {
        self.collect_bar.set_length(forms as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} forms {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        self.show(&self.collect_bar, style);
    }

    fn form_segmented(&self) {
        self.collect_bar.inc(1);
    }

    fn collection_finished(&self) {
        self.collect_bar.finish_with_message("Complete");
    }

    fn trim_pass(&self, pass: usize, removed: usize) {
        if pass == 1 {
            let style = ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            self.show(&self.trim_bar, style);
        }
        self.trim_bar
            .set_message(format!("Trim pass {pass}: {removed} rules removed"));
    }

    fn trim_finished(&self, removed: usize) {
        self.trim_bar
            .finish_with_message(format!("Trimming complete: {removed} rules removed"));
    }
}

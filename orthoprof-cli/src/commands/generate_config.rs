//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# orthoprof configuration
#
# Every key is optional; command-line flags take precedence.

[columns]
# Profile columns
grapheme = "Grapheme"
transcription = "IPA"
# Wordlist columns
form = "Form"
language = "Language_ID"

[processing]
# NFC-normalize profile entries and word forms
normalize = true
# Wrap word forms in ^...$ so boundary rules can match
boundaries = true
# Keep rules that never matched the wordlist
keep_zero = false
# Collect and trim in parallel
parallel = true

[inventory]
# Sound inventory with GRAPHEME, TYPE, SOUND_CLASS and optional ALIASES columns.
# Without one, every sound is accepted.
# path = "inventory.tsv"
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!(
            "Configuration template written to {}",
            self.output.display()
        );
        println!("Use it with: orthoprof format PROFILE --config {}", self.output.display());

        Ok(())
    }
}

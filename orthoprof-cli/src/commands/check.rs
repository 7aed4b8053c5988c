//! Check command implementation

use super::common::ProfileArgs;
use crate::error::CliError;
use crate::output::{open_output, JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::Result;
use clap::Args;
use orthoprof_core::{Finding, ProfileProcessor, Severity};
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Report file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// One finding per line
    Text,
    /// JSON array of findings
    Json,
}

impl CheckArgs {
    /// Report duplicate, conflicting and unknown entries; fails when any
    /// error-level finding is present
    pub fn execute(&self) -> Result<()> {
        self.profile.init_logging();
        let file_config = self.profile.load_config()?;
        let config = self.profile.processing_config(&file_config)?;
        let validator = self.profile.validator(&file_config)?;
        let profile = self.profile.read_profile(&config)?;

        let findings = ProfileProcessor::new(config, validator.as_ref()).check(&profile);
        self.report(&findings)?;

        let errors = findings
            .iter()
            .filter(|finding| finding.severity() == Severity::Error)
            .count();
        if errors > 0 {
            return Err(CliError::CheckFailed(errors).into());
        }
        Ok(())
    }

    fn report(&self, findings: &[Finding]) -> Result<()> {
        let writer = open_output(self.output.as_deref())?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            ReportFormat::Text => Box::new(TextFormatter::new(writer)),
            ReportFormat::Json => Box::new(JsonFormatter::new(writer)),
        };
        for finding in findings {
            formatter.format_finding(finding)?;
        }
        formatter.finish()
    }
}

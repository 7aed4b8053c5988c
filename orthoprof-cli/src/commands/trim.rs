//! Trim command implementation

use super::common::{run_pipeline, Pipeline, PipelineArgs, ProfileArgs};
use anyhow::Result;
use clap::Args;

/// Arguments for the trim command
#[derive(Debug, Args)]
pub struct TrimArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub files: PipelineArgs,
}

impl TrimArgs {
    /// Remove superfluous rules, collecting frequencies when a wordlist is
    /// given
    pub fn execute(&self) -> Result<()> {
        run_pipeline(&self.profile, &self.files, Pipeline::Trim)
    }
}

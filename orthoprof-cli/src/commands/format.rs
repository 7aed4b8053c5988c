//! Format command implementation

use super::common::{run_pipeline, Pipeline, PipelineArgs, ProfileArgs};
use anyhow::Result;
use clap::Args;

/// Arguments for the format command
#[derive(Debug, Args)]
pub struct FormatArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub files: PipelineArgs,
}

impl FormatArgs {
    /// Clean, check and sort the profile, collecting frequencies when a
    /// wordlist is given
    pub fn execute(&self) -> Result<()> {
        run_pipeline(&self.profile, &self.files, Pipeline::Format)
    }
}

//! Output destinations and finding formatters

use anyhow::{Context, Result};
use orthoprof_core::Finding;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for consistency-finding formatters
pub trait OutputFormatter {
    /// Format a single finding
    fn format_finding(&mut self, finding: &Finding) -> Result<()>;

    /// Finalize output (e.g., close the JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Buffered writer to `path`, or to stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

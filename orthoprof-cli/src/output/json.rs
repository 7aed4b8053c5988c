//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use orthoprof_core::{Finding, Severity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs findings as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    findings: Vec<FindingData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct FindingData {
    /// Severity of the finding
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// The finding itself, tagged by `kind`
    #[serde(flatten)]
    pub finding: Finding,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            findings: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_finding(&mut self, finding: &Finding) -> Result<()> {
        self.findings.push(FindingData {
            severity: finding.severity(),
            message: finding.to_string(),
            finding: finding.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.findings)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

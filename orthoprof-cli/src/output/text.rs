//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use orthoprof_core::{Finding, Severity};
use std::io::Write;

/// Text formatter - one finding per line, followed by a summary line
pub struct TextFormatter<W: Write> {
    writer: W,
    warnings: usize,
    errors: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            warnings: 0,
            errors: 0,
        }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_finding(&mut self, finding: &Finding) -> Result<()> {
        let label = match finding.severity() {
            Severity::Warning => {
                self.warnings += 1;
                "warning"
            }
            Severity::Error => {
                self.errors += 1;
                "error"
            }
        };
        writeln!(self.writer, "{label}: {finding}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(
            self.writer,
            "{} error(s), {} warning(s)",
            self.errors, self.warnings
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer);
            formatter
                .format_finding(&Finding::Duplicate {
                    grapheme: "a".to_string(),
                    transcription: "a".to_string(),
                    count: 2,
                })
                .unwrap();
            formatter.finish().unwrap();
        }

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "warning: Duplicate (redundant) entry or entries for grapheme [a] (2 rows).\n\
             0 error(s), 1 warning(s)\n"
        );
    }
}

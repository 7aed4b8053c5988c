//! Tab- and comma-delimited table plumbing shared by profiles, wordlists
//! and sound inventories

use crate::error::{ProfileError, Result};
use std::io::Write;
use std::str::FromStr;

/// Field delimiter of a table file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Tab-separated, no quoting
    #[default]
    Tab,
    /// Comma-separated, RFC 4180 quoting
    Comma,
}

impl Delimiter {
    /// Delimiter byte
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }

    pub(crate) fn reader<R: std::io::Read>(self, input: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.byte())
            .quoting(self == Delimiter::Comma)
            .flexible(true)
            .has_headers(true)
            .from_reader(input)
    }

    pub(crate) fn writer<W: Write>(self, output: W) -> csv::Writer<W> {
        let style = match self {
            Delimiter::Tab => csv::QuoteStyle::Never,
            Delimiter::Comma => csv::QuoteStyle::Necessary,
        };
        csv::WriterBuilder::new()
            .delimiter(self.byte())
            .quote_style(style)
            .from_writer(output)
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tab" | "tsv" | "\t" => Ok(Delimiter::Tab),
            "comma" | "csv" | "," => Ok(Delimiter::Comma),
            other => Err(format!("unknown delimiter: {other}")),
        }
    }
}

/// Header row with column lookup
#[derive(Debug, Clone)]
pub(crate) struct Header {
    names: Vec<String>,
    source_name: String,
}

impl Header {
    pub(crate) fn read<R: std::io::Read>(
        reader: &mut csv::Reader<R>,
        source_name: &str,
    ) -> Result<Self> {
        let names = reader
            .headers()?
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').to_string())
            .collect();
        Ok(Self {
            names,
            source_name: source_name.to_string(),
        })
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn position(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|name| name == column)
    }

    pub(crate) fn require(&self, column: &str) -> Result<usize> {
        self.position(column)
            .ok_or_else(|| ProfileError::MissingColumn {
                column: column.to_string(),
                source_name: self.source_name.clone(),
            })
    }

    pub(crate) fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Value of a required column in `record`
    pub(crate) fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        idx: usize,
    ) -> Result<&'r str> {
        record.get(idx).ok_or_else(|| ProfileError::MissingField {
            column: self.names[idx].clone(),
            line: line_of(record),
            source_name: self.source_name.clone(),
        })
    }
}

/// 1-based line number of a record, header included
pub(crate) fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

/// Flatten tabs and newlines that would break an unquoted row
pub(crate) fn sanitize(value: &str) -> String {
    if value.contains(['\t', '\n', '\r']) {
        value.replace(['\t', '\n', '\r'], " ")
    } else {
        value.to_string()
    }
}

//! Wordlist input and the segmented debug wordlist

use crate::collector::WordForm;
use crate::delimited::{sanitize, Delimiter, Header};
use crate::error::{ProfileError, Result};
use crate::segmenter::Segmentation;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column appended to the debug wordlist
pub const SEGMENTS_COLUMN: &str = "Segments";

/// How a wordlist file is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistOptions {
    /// Column holding the word forms
    pub form_column: String,
    /// Column holding language identifiers
    pub language_column: String,
    /// Fail when the language column is missing
    pub require_language: bool,
    /// Field delimiter
    pub delimiter: Delimiter,
}

impl Default for WordlistOptions {
    fn default() -> Self {
        Self {
            form_column: "Form".to_string(),
            language_column: "Language_ID".to_string(),
            require_language: false,
            delimiter: Delimiter::Tab,
        }
    }
}

/// One wordlist row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistEntry {
    /// The form to segment
    pub form: WordForm,
    /// Every field of the row, in header order
    pub record: Vec<String>,
}

/// A wordlist read into memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    headers: Vec<String>,
    entries: Vec<WordlistEntry>,
}

impl Wordlist {
    /// Read a wordlist file
    pub fn read_path(path: &Path, options: &WordlistOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| ProfileError::open(path, e))?;
        Self::read_from(file, options, &path.display().to_string())
    }

    /// Read a wordlist from any reader
    pub fn read_from<R: Read>(input: R, options: &WordlistOptions, source_name: &str) -> Result<Self> {
        let mut reader = options.delimiter.reader(input);
        let header = Header::read(&mut reader, source_name)?;
        let form_idx = header.require(&options.form_column)?;
        let language_idx = if options.require_language {
            Some(header.require(&options.language_column)?)
        } else {
            header.position(&options.language_column)
        };

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let form = header.field(&record, form_idx)?.to_string();
            let language = match language_idx {
                Some(idx) => header.field(&record, idx)?.trim().to_string(),
                None => String::new(),
            };
            entries.push(WordlistEntry {
                form: WordForm::new(form, language),
                record: record.iter().map(str::to_string).collect(),
            });
        }

        log::debug!("Read {} word forms from {}", entries.len(), source_name);
        Ok(Self {
            headers: header.names().to_vec(),
            entries,
        })
    }

    /// Header row
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in file order
    pub fn entries(&self) -> &[WordlistEntry] {
        &self.entries
    }

    /// Word forms in file order, for a
    /// [`FrequencyCollector`](crate::FrequencyCollector)
    pub fn forms(&self) -> Vec<WordForm> {
        self.entries.iter().map(|entry| entry.form.clone()).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Wordlist has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the rows named by `traces` with their segmentation appended as a
    /// [`SEGMENTS_COLUMN`] column
    ///
    /// Trace indices refer to [`Self::entries`]; rows without a trace (for
    /// example those rejected by a language filter) are omitted.
    pub fn write_segmented<W: Write>(
        &self,
        traces: &[(usize, Segmentation)],
        delimiter: Delimiter,
        output: W,
    ) -> Result<()> {
        let mut writer = delimiter.writer(output);
        let width = self.headers.len();

        let mut header: Vec<String> = self.headers.iter().map(|h| sanitize(h)).collect();
        header.push(SEGMENTS_COLUMN.to_string());
        writer.write_record(&header)?;

        for (idx, segmentation) in traces {
            let Some(entry) = self.entries.get(*idx) else {
                continue;
            };
            let mut row: Vec<String> = entry.record.iter().map(|f| sanitize(f)).collect();
            row.resize(width, String::new());
            row.push(sanitize(&segmentation.to_string()));
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{FrequencyCollector, LanguageFilter};
    use crate::rule::Rule;
    use crate::table::RuleTable;

    const DATA: &str = "ID\tLanguage_ID\tForm\n1\tl1\tab\n2\tl2\tba\n3\tl1\tc\n";

    #[test]
    fn test_read_forms_and_languages() {
        let wordlist = Wordlist::read_from(DATA.as_bytes(), &WordlistOptions::default(), "wl").unwrap();

        assert_eq!(wordlist.len(), 3);
        assert_eq!(wordlist.headers(), ["ID", "Language_ID", "Form"]);
        assert_eq!(wordlist.forms()[1], WordForm::new("ba", "l2"));
    }

    #[test]
    fn test_language_column_optional_unless_required() {
        let data = "Form\nab\n";
        let wordlist = Wordlist::read_from(data.as_bytes(), &WordlistOptions::default(), "wl").unwrap();
        assert_eq!(wordlist.forms()[0].language, "");

        let required = WordlistOptions {
            require_language: true,
            ..WordlistOptions::default()
        };
        let err = Wordlist::read_from(data.as_bytes(), &required, "wl").unwrap_err();
        assert!(matches!(err, ProfileError::MissingColumn { column, .. } if column == "Language_ID"));
    }

    #[test]
    fn test_missing_form_column() {
        let err = Wordlist::read_from("Word\nab\n".as_bytes(), &WordlistOptions::default(), "wl")
            .unwrap_err();
        assert!(matches!(err, ProfileError::MissingColumn { column, .. } if column == "Form"));
    }

    #[test]
    fn test_comma_wordlist() {
        let options = WordlistOptions {
            delimiter: Delimiter::Comma,
            ..WordlistOptions::default()
        };
        let data = "Form,Gloss\n\"a,b\",x\n";
        let wordlist = Wordlist::read_from(data.as_bytes(), &options, "wl").unwrap();
        assert_eq!(wordlist.forms()[0].form, "a,b");
    }

    #[test]
    fn test_write_segmented_skips_filtered_rows() {
        let wordlist = Wordlist::read_from(DATA.as_bytes(), &WordlistOptions::default(), "wl").unwrap();
        let table: RuleTable = [Rule::new("a", "a"), Rule::new("b", "b")]
            .into_iter()
            .collect();

        let collection = FrequencyCollector::new(&table)
            .filter(LanguageFilter::Only("l1".to_string()))
            .audit(true)
            .parallel(false)
            .collect(&wordlist.forms());

        let mut out = Vec::new();
        wordlist
            .write_segmented(&collection.traces, Delimiter::Tab, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID\tLanguage_ID\tForm\tSegments");
        assert_eq!(lines[1], "1\tl1\tab\t{^}/{} {a}/{a} {b}/{b} {$}/{}");
        assert_eq!(lines[2], "3\tl1\tc\t{^}/{} <<c>> {$}/{}");
    }
}

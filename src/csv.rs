//! Translation dictionary CSV dialect.
//!
//! Magento i18n files are `"phrase","translation"[,type,module]` records.
//! Fields may be enclosed, enclosures are escaped by doubling, and enclosed
//! fields may span lines.

use crate::translations::Dictionary;

const BOM: char = '\u{feff}';

/// CSV reader/writer for key/value pair records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvParser {
    delimiter: char,
    enclosure: char,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            enclosure: '"',
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_enclosure(mut self, enclosure: char) -> Self {
        self.enclosure = enclosure;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Split content into records of fields. Blank lines produce no record.
    pub fn parse_rows(&self, content: &str) -> Vec<Vec<String>> {
        let content = content.strip_prefix(BOM).unwrap_or(content);

        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut field = String::new();
        let mut in_enclosure = false;
        let mut has_content = false;
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if in_enclosure {
                if c == self.enclosure {
                    if chars.peek() == Some(&self.enclosure) {
                        field.push(c);
                        chars.next();
                    } else {
                        in_enclosure = false;
                    }
                } else {
                    field.push(c);
                }
                continue;
            }

            match c {
                c if c == self.enclosure => {
                    in_enclosure = true;
                    has_content = true;
                }
                c if c == self.delimiter => {
                    row.push(std::mem::take(&mut field));
                    has_content = true;
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\r' | '\n' => {
                    finish_row(&mut rows, &mut row, &mut field, &mut has_content);
                }
                c => {
                    field.push(c);
                    has_content = true;
                }
            }
        }
        finish_row(&mut rows, &mut row, &mut field, &mut has_content);

        rows
    }

    /// Build a key/value dictionary from the first two columns.
    ///
    /// Rows without a value column or with an empty key are skipped; a
    /// repeated key keeps the last row's value.
    pub fn data_pairs(&self, content: &str) -> Dictionary {
        let mut pairs = Dictionary::new();

        for row in self.parse_rows(content) {
            let mut columns = row.into_iter();
            let (Some(key), Some(value)) = (columns.next(), columns.next()) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            pairs.insert(key, value);
        }

        pairs
    }

    /// Format one record, enclosing only fields that need it
    pub fn write_row(&self, fields: &[&str]) -> String {
        let mut line = String::new();

        for (i, value) in fields.iter().enumerate() {
            if i > 0 {
                line.push(self.delimiter);
            }

            let needs_enclosure = value.chars().any(|c| {
                c == self.delimiter || c == self.enclosure || matches!(c, '\n' | '\r' | '\t' | ' ')
            });

            if needs_enclosure {
                line.push(self.enclosure);
                for c in value.chars() {
                    if c == self.enclosure {
                        line.push(c);
                    }
                    line.push(c);
                }
                line.push(self.enclosure);
            } else {
                line.push_str(value);
            }
        }

        line
    }
}

fn finish_row(
    rows: &mut Vec<Vec<String>>,
    row: &mut Vec<String>,
    field: &mut String,
    has_content: &mut bool,
) {
    if *has_content {
        row.push(std::mem::take(field));
        rows.push(std::mem::take(row));
    }
    row.clear();
    field.clear();
    *has_content = false;
}

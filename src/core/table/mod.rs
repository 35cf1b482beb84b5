//! # Table Module
//!
//! Minimal delimited-table codec shared by the manifest reader and the
//! result log writer.
//!
//! ## Format
//! - Fields separated by `,`, records by `\n` (a preceding `\r` is dropped)
//! - Quote character is `|`; inside a quoted field `||` is a literal `|`
//! - Quoted fields may contain delimiters and line breaks
//! - On write, only fields that need it are quoted

use crate::error::ManifestError;

/// Delimiter and quote settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub delimiter: char,
    pub quote: char,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '|',
        }
    }
}

/// A parsed record and the line it started on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    /// A record with a single empty field, i.e. a blank line
    pub fn is_blank(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if only.is_empty())
    }
}

impl TableFormat {
    /// Split `text` into records.
    pub fn parse(&self, text: &str) -> Result<Vec<Record>, ManifestError> {
        let mut records = Vec::new();
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut line = 1;
        let mut record_line = 1;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                if c == self.quote {
                    if chars.peek() == Some(&self.quote) {
                        chars.next();
                        field.push(self.quote);
                    } else {
                        in_quotes = false;
                    }
                } else {
                    if c == '\n' {
                        line += 1;
                    }
                    field.push(c);
                }
                continue;
            }

            match c {
                c if c == self.quote => in_quotes = true,
                c if c == self.delimiter => fields.push(std::mem::take(&mut field)),
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    records.push(Record {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                    line += 1;
                    record_line = line;
                }
                other => field.push(other),
            }
        }

        if in_quotes {
            return Err(ManifestError::Malformed {
                line: record_line,
                reason: format!("unterminated quoted field (quote character '{}')", self.quote),
            });
        }

        if !field.is_empty() || !fields.is_empty() {
            fields.push(field);
            records.push(Record {
                line: record_line,
                fields,
            });
        }

        Ok(records)
    }

    /// Render one record, quoting only the fields that need it. No line terminator.
    pub fn format_record<S: AsRef<str>>(&self, fields: &[S]) -> String {
        fields
            .iter()
            .map(|f| self.format_field(f.as_ref()))
            .collect::<Vec<_>>()
            .join(&self.delimiter.to_string())
    }

    fn format_field(&self, field: &str) -> String {
        let needs_quotes = field
            .chars()
            .any(|c| c == self.delimiter || c == self.quote || c == '\n' || c == '\r');

        if !needs_quotes {
            return field.to_string();
        }

        let doubled = format!("{}{}", self.quote, self.quote);
        let escaped = field.replace(self.quote, &doubled);
        format!("{}{}{}", self.quote, escaped, self.quote)
    }
}

/// Render a float as a plain decimal that always carries a fractional part.
///
/// `0.0` stays `0.0`, never `0`, and tiny timings never switch to exponent form.
pub fn format_decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Vec<String>> {
        TableFormat::default()
            .parse(text)
            .unwrap()
            .into_iter()
            .map(|r| r.fields)
            .collect()
    }

    #[test]
    fn parses_plain_records() {
        let rows = parse("image1,image2\na.png,b.png\n");
        assert_eq!(rows, vec![vec!["image1", "image2"], vec!["a.png", "b.png"]]);
    }

    #[test]
    fn last_record_without_newline_is_kept() {
        let rows = parse("h1,h2\nx.png,y.png");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["x.png", "y.png"]);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let rows = parse("h1,h2\r\na.png,b.png\r\n");
        assert_eq!(rows[1], vec!["a.png", "b.png"]);
    }

    #[test]
    fn pipe_quotes_protect_delimiters() {
        let rows = parse("|a,1.png|,b.png\n");
        assert_eq!(rows[0], vec!["a,1.png", "b.png"]);
    }

    #[test]
    fn doubled_quote_is_literal() {
        let rows = parse("|odd||name.png|,b.png\n");
        assert_eq!(rows[0], vec!["odd|name.png", "b.png"]);
    }

    #[test]
    fn quoted_field_may_span_lines() {
        let records = TableFormat::default()
            .parse("|multi\nline.png|,b.png\nnext.png,c.png\n")
            .unwrap();

        assert_eq!(records[0].fields, vec!["multi\nline.png", "b.png"]);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let result = TableFormat::default().parse("h\n|open,b.png\n");
        assert!(matches!(result, Err(ManifestError::Malformed { line: 2, .. })));
    }

    #[test]
    fn blank_line_is_blank_record() {
        let records = TableFormat::default().parse("h\n\na,b\n").unwrap();
        assert!(records[1].is_blank());
        assert!(!records[2].is_blank());
    }

    #[test]
    fn delimiter_only_record_is_not_blank() {
        let records = TableFormat::default().parse(",\n,,\n").unwrap();
        assert_eq!(records[0].fields, vec!["", ""]);
        assert!(!records[0].is_blank());
        assert!(!records[1].is_blank());
    }

    #[test]
    fn format_quotes_only_when_needed() {
        let format = TableFormat::default();
        assert_eq!(format.format_record(&["a.png", "b.png"]), "a.png,b.png");
        assert_eq!(format.format_record(&["a,b.png", "c.png"]), "|a,b.png|,c.png");
        assert_eq!(format.format_record(&["a|b.png"]), "|a||b.png|");
    }

    #[test]
    fn formatted_record_parses_back() {
        let format = TableFormat::default();
        let line = format.format_record(&["we|ird,name.png", "plain.png"]);
        let records = format.parse(&line).unwrap();

        assert_eq!(records[0].fields, vec!["we|ird,name.png", "plain.png"]);
    }

    #[test]
    fn decimals_always_have_fraction() {
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(1.0), "1.0");
        assert_eq!(format_decimal(0.25), "0.25");
        assert_eq!(format_decimal(0.000012), "0.000012");
    }
}

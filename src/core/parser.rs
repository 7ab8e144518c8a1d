//! Line parsing, validation and ordering of customer records.
//!
//! Parsing is all-or-nothing: the first line that does not split into exactly
//! six fields fails the whole batch and no records are returned.

use crate::domain::model::{Customer, Delimiter, ParseOptions, SortKey, EXPECTED_FIELDS};
use crate::utils::error::{EtlError, Result};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct CustomerParser {
    options: ParseOptions,
}

impl CustomerParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses every line and returns the records ordered by the sort key.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<Vec<Customer>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut customers = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| parse_line(line.as_ref(), self.options.delimiter, index + 1))
            .collect::<Result<Vec<_>>>()?;

        sort_customers(&mut customers, self.options.sort_key);
        Ok(customers)
    }

    /// Parses a whole document; `\n` and `\r\n` terminators are stripped.
    pub fn parse_text(&self, text: &str) -> Result<Vec<Customer>> {
        self.parse_lines(text.lines())
    }
}

/// Validates `sort_by` and `delimiter` (in that order) and parses `lines`.
pub fn parse<I, S>(lines: I, delimiter: &str, sort_by: &str) -> Result<Vec<Customer>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let options = ParseOptions::new(delimiter, sort_by)?;
    CustomerParser::new(options).parse_lines(lines)
}

/// Like [`parse`] but reads the lines from `path`. The options are checked
/// before the file is opened.
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: &str, sort_by: &str) -> Result<Vec<Customer>> {
    let options = ParseOptions::new(delimiter, sort_by)?;
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|e| open_error(&path.display().to_string(), e))?;
    let text = decode(bytes)?;

    CustomerParser::new(options).parse_text(&text)
}

/// Splits a line into fields. Trailing empty fields are dropped, so a line
/// ending in the delimiter is one field short and an empty line has none.
pub fn split_fields(line: &str, delimiter: Delimiter) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(delimiter.as_str()).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_line(line: &str, delimiter: Delimiter, line_number: usize) -> Result<Customer> {
    let fields = split_fields(line, delimiter);
    let fields: [&str; EXPECTED_FIELDS] =
        fields.as_slice().try_into().map_err(|_| EtlError::MalformedLine {
            line_number,
            expected: EXPECTED_FIELDS,
            found: fields.len(),
        })?;
    Ok(Customer::from_fields(fields))
}

/// Stable ascending sort on the lowercased sort field.
pub fn sort_customers(customers: &mut [Customer], sort_key: SortKey) {
    customers.sort_by_cached_key(|customer| sort_key.field(customer).to_lowercase());
}

/// Maps a failure to open/read the input into the error callers see.
pub(crate) fn open_error(path: &str, error: std::io::Error) -> EtlError {
    match error.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => EtlError::ResourceNotFound {
            path: path.to_string(),
        },
        _ => EtlError::IoError(error),
    }
}

pub(crate) fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| EtlError::IoError(std::io::Error::new(ErrorKind::InvalidData, e)))
}

//! CSV record files: the on-disk hand-off between serializer and publisher.
//!
//! One record per row, header row required. The header is the union of the
//! field names of all records in first-seen order. Each column is typed by
//! the values it holds:
//!
//! - only integers and booleans: `:UNQUOTED` marker, cells read back as JSON
//!   scalars
//! - any float, array or object, or strings mixed with integers/booleans:
//!   `:JSON` marker, every cell stored as JSON text (strings stay quoted)
//! - otherwise plain text
//!
//! Empty cells mean the field is absent from that record.

use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::errors::CoreError;
use crate::fields::{JSON_SUFFIX, UNQUOTED_SUFFIX};
use crate::serializer::{Record, unquoted_marker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Text,
    Unquoted,
    Json,
}

impl ColumnKind {
    const fn marker(self) -> &'static str {
        match self {
            Self::Text => "",
            Self::Unquoted => UNQUOTED_SUFFIX,
            Self::Json => JSON_SUFFIX,
        }
    }

    fn from_header(header: &str) -> (&str, Self) {
        if let Some(name) = header.strip_suffix(UNQUOTED_SUFFIX) {
            (name, Self::Unquoted)
        } else if let Some(name) = header.strip_suffix(JSON_SUFFIX) {
            (name, Self::Json)
        } else {
            (header, Self::Text)
        }
    }
}

/// Value shapes seen in one column while writing.
#[derive(Debug, Default)]
struct Seen<'a> {
    name: &'a str,
    text: bool,
    unquoted: bool,
    structured: bool,
}

impl Seen<'_> {
    fn observe(&mut self, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(_) => self.text = true,
            other if !unquoted_marker(other).is_empty() => self.unquoted = true,
            _ => self.structured = true,
        }
    }

    const fn kind(&self) -> ColumnKind {
        if self.structured || (self.unquoted && self.text) {
            ColumnKind::Json
        } else if self.unquoted {
            ColumnKind::Unquoted
        } else {
            ColumnKind::Text
        }
    }
}

/// Write `records` to a CSV file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CoreError::Csv`] or [`CoreError::Io`] if the file cannot be
/// created or written.
pub fn write_records(path: &Path, records: &[Record]) -> Result<(), CoreError> {
    let mut seen: Vec<Seen<'_>> = Vec::new();
    for record in records {
        for (name, value) in record {
            let idx = match seen.iter().position(|column| column.name == name.as_str()) {
                Some(idx) => idx,
                None => {
                    seen.push(Seen {
                        name: name.as_str(),
                        ..Seen::default()
                    });
                    seen.len() - 1
                }
            };
            seen[idx].observe(value);
        }
    }
    let columns: Vec<(&str, ColumnKind)> = seen.iter().map(|s| (s.name, s.kind())).collect();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(
        columns
            .iter()
            .map(|(name, kind)| format!("{name}{}", kind.marker())),
    )?;

    for record in records {
        let mut row = Vec::with_capacity(columns.len());
        for (name, kind) in &columns {
            row.push(match record.get(*name) {
                Some(value) => cell_text(value, *kind)?,
                None => String::new(),
            });
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn cell_text(value: &Value, kind: ColumnKind) -> Result<String, CoreError> {
    Ok(match (value, kind) {
        (Value::Null, _) => String::new(),
        (Value::String(s), ColumnKind::Text | ColumnKind::Unquoted) => s.clone(),
        (other, ColumnKind::Json) => serde_json::to_string(other)
            .map_err(|e| CoreError::MalformedRecord(format!("unencodable value: {e}")))?,
        (other, _) => other.to_string(),
    })
}

#[derive(Debug)]
struct Column {
    name: String,
    kind: ColumnKind,
}

/// Streaming reader over the records of one CSV record file.
///
/// Records are yielded in file order. The file handle is released when the
/// reader is dropped.
pub struct RecordFileReader {
    columns: Vec<Column>,
    rows: csv::StringRecordsIntoIter<File>,
}

impl RecordFileReader {
    /// Open a record file and read its header row.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Csv`] if the file cannot be opened or its header
    /// cannot be parsed.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let mut reader = csv::Reader::from_path(path)?;
        let columns = reader
            .headers()?
            .iter()
            .map(|header| {
                let (name, kind) = ColumnKind::from_header(header);
                Column {
                    name: name.to_string(),
                    kind,
                }
            })
            .collect();

        Ok(Self {
            columns,
            rows: reader.into_records(),
        })
    }

    /// Field names from the header, without type markers.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    fn to_record(&self, row: &csv::StringRecord) -> Result<Record, CoreError> {
        let mut record = Record::new();
        for (column, cell) in self.columns.iter().zip(row.iter()) {
            if cell.is_empty() {
                continue;
            }
            let value = match column.kind {
                ColumnKind::Text => Value::from(cell),
                ColumnKind::Unquoted => parse_unquoted(cell),
                ColumnKind::Json => serde_json::from_str(cell).map_err(|e| {
                    CoreError::MalformedRecord(format!(
                        "field '{}' is not valid JSON: {e}",
                        column.name
                    ))
                })?,
            };
            record.insert(column.name.clone(), value);
        }
        Ok(record)
    }
}

impl Iterator for RecordFileReader {
    type Item = Result<Record, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(row.map_err(CoreError::from).and_then(|row| self.to_record(&row)))
    }
}

/// Cells of an `:UNQUOTED` column that are not a boolean or number stay text.
fn parse_unquoted(cell: &str) -> Value {
    match serde_json::from_str::<Value>(cell) {
        Ok(value @ (Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::from(cell),
    }
}

/// Read every record of a file into memory.
///
/// # Errors
///
/// Returns the first open or parse failure.
pub fn read_records(path: &Path) -> Result<Vec<Record>, CoreError> {
    RecordFileReader::open(path)?.collect()
}

//! Tabular record sets: the in-memory shape of inventory, sales and
//! purchase data.
//!
//! A `RecordSet` is a list of column names plus rows of `Value`s, one value
//! per column. The fields are public so storage code can assemble sets
//! directly; `check_shape` verifies the one-value-per-column invariant.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Format used when writing dates back to storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored date, with or without a time component.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    /// Missing cell
    Empty,
}

impl Value {
    /// Parse a raw storage cell.
    ///
    /// Blank cells and `NaN` are `Empty`; anything that parses as a float is
    /// a `Number`; everything else stays `Text`. Dates are not detected here
    /// because only the date column should be coerced.
    pub fn parse_cell(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_nan() => Value::Empty,
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(raw.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Numeric view of the cell; numeric text is accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Date view of the cell; date text is parsed.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// Render the cell for storage.
    pub fn to_cell(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Value::Number(n) => n.to_string(),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Empty => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cell())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Value::Date(d)
    }
}

/// Shape violations in a record set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Row {row} has {found} values but the record set has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Ordered rows sharing one column set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RecordSet {
    /// An empty record set with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a record set and check its shape.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        };
        set.check_shape()?;
        Ok(set)
    }

    /// Empty means no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Verify every row has exactly one value per column.
    pub fn check_shape(&self) -> Result<(), RecordError> {
        let expected = self.columns.len();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, values)) => Err(RecordError::RaggedRow {
                row,
                expected,
                found: values.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Overwrite one cell. Returns false if the row or column does not exist.
    pub fn set_value(&mut self, row: usize, column: &str, value: Value) -> bool {
        let Some(idx) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row).and_then(|r| r.get_mut(idx)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// All values of one column, top to bottom.
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }

    /// Append a column, filling existing rows with `fill`.
    pub fn push_column(&mut self, name: impl Into<String>, fill: Value) {
        self.columns.push(name.into());
        for row in &mut self.rows {
            row.push(fill.clone());
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), RecordError> {
        if row.len() != self.columns.len() {
            return Err(RecordError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a row given as name/value pairs.
    ///
    /// Columns the set lacks are added first (existing rows get `Empty`);
    /// columns the pairs omit are `Empty` in the new row.
    pub fn push_record(&mut self, pairs: Vec<(String, Value)>) {
        for (name, _) in &pairs {
            if !self.has_column(name) {
                self.push_column(name.clone(), Value::Empty);
            }
        }
        let mut row = vec![Value::Empty; self.columns.len()];
        for (name, value) in pairs {
            if let Some(idx) = self.column_index(&name) {
                row[idx] = value;
            }
        }
        self.rows.push(row);
    }

    /// Iterate rows as name-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |values| Record {
            columns: &self.columns,
            values,
        })
    }
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }
}

//! Plain row records produced by the reader and consumed by the normalizer.

use crate::spreadsheet::date::format_date_time;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde::Serializer;
use std::collections::HashMap;
use std::fmt::Display;

/// A decoded cell value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Converts one field of a sheet-to-JSON style export.
    /// Nested arrays and objects are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Empty,
            serde_json::Value::Bool(value) => Self::Bool(*value),
            serde_json::Value::Number(number) => number
                .as_f64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Text(number.to_string())),
            serde_json::Value::String(text) => Self::Text(text.to_owned()),
            other => Self::Text(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Largest magnitude an `f64` holds without losing integer precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whole numbers serialize as JSON integers, as a spreadsheet export would.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*value as i64)
            }
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::DateTime(value) => value.serialize(serializer),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(value) => f.write_str(value),
            Self::DateTime(value) => f.write_str(&format_date_time(value)),
        }
    }
}

/// One spreadsheet line below the header, keyed by column name.
/// Empty cells are not present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, CellValue)>>(iter: T) -> Self {
        let cells = iter
            .into_iter()
            .map(|(column, value)| (column.into(), value))
            .collect();
        Self { cells }
    }
}

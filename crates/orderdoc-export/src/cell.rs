//! Printable cells.

use crate::settings::NO_TOTAL_MARKER;
use orderdoc_types::{PlainValue, SpecValue, format_number};
use serde::{Serialize, Serializer};
use std::fmt;

/// One cell of an exported row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// A flat list of cells.
pub type Row = Vec<Cell>;

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Cell for an item's value. Files become `file_marker`; absent and empty
    /// values become `missing_marker`.
    pub fn for_value(value: Option<&SpecValue>, file_marker: &str, missing_marker: &str) -> Self {
        match value {
            Some(SpecValue::File(_)) => Cell::text(file_marker),
            Some(value) if value.is_empty() => Cell::text(missing_marker),
            Some(SpecValue::Plain(PlainValue::Number(n))) => Cell::Number(*n),
            Some(value) => Cell::text(value.to_string()),
            None => Cell::text(missing_marker),
        }
    }

    /// Cell for a column total; keys without a total show `-`.
    pub fn for_total(total: Option<f64>) -> Self {
        match total {
            Some(n) => Cell::Number(n),
            None => Cell::text(NO_TOTAL_MARKER),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => f.write_str(&format_number(*n)),
            Cell::Empty => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            _ => serializer.collect_str(self),
        }
    }
}

/// Render a row as display strings.
pub fn row_strings(row: &[Cell]) -> Vec<String> {
    row.iter().map(Cell::to_string).collect()
}

//! FILENAME: engine/src/result_set.rs
//! PURPOSE: The canonical tabular shape returned by every report execution.
//! CONTEXT: Rows are positional and aligned with `columns`. A ResultSet is
//! immutable once built; the only way in is through `ResultSet::new` (or
//! deserialization, which runs the same validation), so every row is
//! guaranteed to be exactly as wide as the header.
//!
//! The execution backend also uses this channel to report failures: a
//! single-column result whose column is a reserved marker ("Error",
//! "Message", or a localized spelling) is a *sentinel*, not data.

use serde::{Deserialize, Serialize};
use crate::cell::CellValue;

/// Column names the backend uses to report a failure.
pub const ERROR_MARKERS: &[&str] = &["Error", "Ошибка", "Помилка"];

/// Column names the backend uses to report an informational message
/// (typically "no data").
pub const MESSAGE_MARKERS: &[&str] = &["Message", "Сообщение", "Повідомлення"];

// ============================================================================
// SHAPE ERROR
// ============================================================================

/// A row whose width does not match the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub row_index: usize,
    pub expected: usize,
    pub actual: usize,
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Row {} has {} cells, expected {} (one per column)",
            self.row_index, self.actual, self.expected
        )
    }
}

impl std::error::Error for ShapeError {}

// ============================================================================
// SENTINEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentinelKind {
    Error,
    Message,
}

/// An out-of-band condition reported through the data channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentinel {
    pub kind: SentinelKind,
    /// The literal column name that marked the result.
    pub marker: String,
    /// First cell of the first row, stringified (empty when there are no rows).
    pub message: String,
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            SentinelKind::Error => "error",
            SentinelKind::Message => "message",
        };
        if self.message.is_empty() {
            write!(f, "Report returned an empty {} result", kind)
        } else {
            write!(f, "Report returned {}: {}", kind, self.message)
        }
    }
}

impl std::error::Error for Sentinel {}

// ============================================================================
// RESULT SET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawResultSet")]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

#[derive(Deserialize)]
struct RawResultSet {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<CellValue>>,
}

impl TryFrom<RawResultSet> for ResultSet {
    type Error = ShapeError;

    fn try_from(raw: RawResultSet) -> Result<Self, Self::Error> {
        ResultSet::new(raw.columns, raw.rows)
    }
}

impl ResultSet {
    /// Builds a result set, rejecting any row that is not exactly
    /// `columns.len()` cells wide.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, ShapeError> {
        let expected = columns.len();
        if let Some((row_index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ShapeError {
                row_index,
                expected,
                actual: row.len(),
            });
        }
        Ok(ResultSet { columns, rows })
    }

    /// Builds a single-column sentinel result carrying `message`.
    pub fn sentinel(marker: &str, message: impl Into<String>) -> Self {
        ResultSet {
            columns: vec![marker.to_string()],
            rows: vec![vec![CellValue::Text(message.into())]],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterates the values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Detects the reserved single-column marker shape.
    pub fn detect_sentinel(&self) -> Option<Sentinel> {
        if self.columns.len() != 1 {
            return None;
        }
        let marker = self.columns[0].as_str();
        let kind = if ERROR_MARKERS.contains(&marker) {
            SentinelKind::Error
        } else if MESSAGE_MARKERS.contains(&marker) {
            SentinelKind::Message
        } else {
            return None;
        };

        let message = self
            .rows
            .first()
            .and_then(|row| row.first())
            .map(CellValue::display_value)
            .unwrap_or_default();

        Some(Sentinel {
            kind,
            marker: marker.to_string(),
            message,
        })
    }

    pub fn is_sentinel(&self) -> bool {
        self.detect_sentinel().is_some()
    }

    /// Converts the in-band sentinel convention into a tagged result.
    pub fn into_outcome(self) -> Result<ResultSet, Sentinel> {
        match self.detect_sentinel() {
            Some(sentinel) => Err(sentinel),
            None => Ok(self),
        }
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<CellValue>>) {
        (self.columns, self.rows)
    }
}

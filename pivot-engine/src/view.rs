//! FILENAME: pivot-engine/src/view.rs
//! Pivot View - Dense output for table and chart rendering.
//!
//! `columns` is `[x_field, y_1, y_2, ...]` with the y-values sorted
//! ascending. Every row carries exactly one cell per y-column, `None` where
//! the (x, y) pair had no contributing rows. Rows are sorted ascending by the
//! x-value's display string.

use serde::{Deserialize, Serialize};
use engine::{CellValue, ResultSet};

/// One output row: the x-value plus one aggregated cell per y-column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    /// The first source value seen for this row's x key.
    pub x_value: CellValue,
    /// Aligned with `PivotedData::y_columns()`.
    pub cells: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotedData {
    pub x_field: String,
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
}

impl PivotedData {
    /// The y-value columns (everything after the x column).
    pub fn y_columns(&self) -> &[String] {
        self.columns.get(1..).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Looks up a cell by row position and column name.
    /// Returns `None` for an unknown column or an empty cell alike.
    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        let col = self.y_columns().iter().position(|c| c == column)?;
        self.rows.get(row)?.cells.get(col).copied().flatten()
    }

    /// Finds the row for an x-value by its display string.
    pub fn row_for(&self, x_key: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.x_value.display_value() == x_key)
    }

    /// Flattens the pivot back into a plain result grid (empty cells become
    /// `CellValue::Empty`), for table rendering and export.
    pub fn to_result_set(&self) -> ResultSet {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = Vec::with_capacity(self.columns.len());
                out.push(row.x_value.clone());
                out.extend(row.cells.iter().map(|c| CellValue::from(*c)));
                out
            })
            .collect();

        // Width is guaranteed by calculate_pivot; only a hand-built
        // PivotedData can be ragged.
        match ResultSet::new(self.columns.clone(), rows) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("pivot rows do not match header: {}", e);
                ResultSet::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PivotedData {
        PivotedData {
            x_field: "g".to_string(),
            columns: vec!["g".to_string(), "x".to_string(), "y".to_string()],
            rows: vec![
                PivotRow {
                    x_value: CellValue::text("A"),
                    cells: vec![Some(10.0), Some(5.0)],
                },
                PivotRow {
                    x_value: CellValue::text("B"),
                    cells: vec![Some(3.0), None],
                },
            ],
        }
    }

    #[test]
    fn test_value_lookup() {
        let data = sample();
        assert_eq!(data.value(0, "y"), Some(5.0));
        assert_eq!(data.value(1, "y"), None);
        assert_eq!(data.value(0, "missing"), None);
        assert_eq!(data.row_for("B").map(|r| r.cells.clone()), Some(vec![Some(3.0), None]));
    }

    #[test]
    fn test_to_result_set() {
        let rs = sample().to_result_set();
        assert_eq!(rs.columns(), &["g", "x", "y"]);
        assert_eq!(
            rs.rows()[1],
            vec![CellValue::text("B"), CellValue::Number(3.0), CellValue::Empty]
        );
    }
}

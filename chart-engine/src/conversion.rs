//! FILENAME: chart-engine/src/conversion.rs
//! Pivot -> chart conversion.
//!
//! Maps a pivoted table onto a linear chart: pivot rows become x-axis
//! categories and each y-value column becomes one series. No validation is
//! performed; the input is assumed to come from `calculate_pivot`.

use pivot_engine::{PivotSpec, PivotedData};
use crate::view::{ChartData, Dataset};

/// Converts a pivot into linear chart series.
///
/// Series labels are the y-value column names, and the y-axis title reads
/// "<Aggregation> of <value field>".
pub fn pivot_to_chart(pivoted: &PivotedData, spec: &PivotSpec) -> ChartData {
    let x_axis_values = pivoted
        .rows
        .iter()
        .map(|row| row.x_value.display_value())
        .collect();

    let datasets = pivoted
        .y_columns()
        .iter()
        .enumerate()
        .map(|(col, label)| Dataset {
            label: label.clone(),
            data: pivoted
                .rows
                .iter()
                .map(|row| row.cells.get(col).copied().flatten().filter(|v| !v.is_nan()))
                .collect(),
        })
        .collect();

    ChartData {
        x_axis_values,
        datasets,
        y_axis_label: Some(spec.value_label()),
    }
}

//! FILENAME: chart-engine/src/engine.rs
//! Chart Engine - projects a result set through a chart descriptor.
//!
//! Validation order (first failure wins, nothing partial is returned):
//! 1. sentinel result
//! 2. descriptor missing type / x-axis field / body fields
//! 3. x-axis field not a column
//! 4. circular: first body field not a column
//!    linear: every missing body field, reported together
//!
//! Null handling differs by kind: a circular chart has no notion of a gap,
//! so empty and non-numeric cells become 0; a linear chart keeps them as
//! `None` gaps.

use engine::{CellValue, ChartDescriptor, ChartType, ResultSet};
use crate::error::ChartError;
use crate::view::{ChartData, ChartKind, ChartProjection, Dataset};

/// Projects `result` into chart series as described by `descriptor`.
pub fn project_chart(
    result: &ResultSet,
    descriptor: &ChartDescriptor,
) -> Result<ChartProjection, ChartError> {
    if result.is_sentinel() {
        return Err(ChartError::SentinelResult);
    }

    let chart_type = descriptor.chart_type.ok_or(ChartError::IncompleteConfiguration)?;
    let x_field = descriptor.x_field().ok_or(ChartError::IncompleteConfiguration)?;
    if descriptor.body_fields.is_empty() {
        return Err(ChartError::IncompleteConfiguration);
    }

    let x_index = result
        .column_index(x_field)
        .ok_or_else(|| ChartError::MissingXAxisField(x_field.to_string()))?;
    let x_axis_values: Vec<String> = result
        .column_values(x_index)
        .map(CellValue::display_value)
        .collect();

    let projection = match chart_type {
        ChartType::Circular => ChartProjection {
            chart_data: project_circular(result, descriptor, x_axis_values)?,
            chart_kind: ChartKind::Circular,
        },
        ChartType::Linear | ChartType::Bubble | ChartType::Other => ChartProjection {
            chart_data: project_linear(result, descriptor, x_axis_values)?,
            chart_kind: ChartKind::Linear,
        },
    };

    log::debug!(
        "chart projected kind={:?} points={} series={}",
        projection.chart_kind,
        projection.chart_data.x_axis_values.len(),
        projection.chart_data.datasets.len()
    );
    Ok(projection)
}

fn project_circular(
    result: &ResultSet,
    descriptor: &ChartDescriptor,
    x_axis_values: Vec<String>,
) -> Result<ChartData, ChartError> {
    let field = &descriptor.body_fields[0];
    let index = result
        .column_index(field)
        .ok_or_else(|| ChartError::MissingValueField(field.clone()))?;

    let label = descriptor
        .series_labels()
        .first()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .unwrap_or_else(|| field.clone());

    let data = result
        .column_values(index)
        .map(|cell| Some(cell.to_number().unwrap_or(0.0)))
        .collect();

    Ok(ChartData {
        x_axis_values,
        datasets: vec![Dataset { label, data }],
        y_axis_label: None,
    })
}

fn project_linear(
    result: &ResultSet,
    descriptor: &ChartDescriptor,
    x_axis_values: Vec<String>,
) -> Result<ChartData, ChartError> {
    let mut indices = Vec::with_capacity(descriptor.body_fields.len());
    let mut missing = Vec::new();
    for field in &descriptor.body_fields {
        match result.column_index(field) {
            Some(index) => indices.push(index),
            None => missing.push(field.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(ChartError::MissingValueFields(missing));
    }

    let labels = descriptor.series_labels();
    let datasets = descriptor
        .body_fields
        .iter()
        .zip(indices)
        .enumerate()
        .map(|(position, (field, index))| Dataset {
            label: labels
                .get(position)
                .filter(|l| !l.is_empty())
                .map(|l| l.to_string())
                .unwrap_or_else(|| field.clone()),
            data: result
                .column_values(index)
                .map(CellValue::to_number)
                .collect(),
        })
        .collect();

    Ok(ChartData {
        x_axis_values,
        datasets,
        y_axis_label: descriptor.y_axis_label.clone(),
    })
}

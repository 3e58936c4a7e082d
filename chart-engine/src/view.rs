//! FILENAME: chart-engine/src/view.rs
//! Chart View - Series data handed to the line/doughnut renderers.
//!
//! Every dataset's `data` has exactly one entry per x-axis value. `None`
//! is a gap in a linear chart; circular charts never contain gaps.

use serde::{Deserialize, Serialize};

/// The resolved kind of a projected chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Multiple series over a shared x axis.
    Linear,
    /// A single series of labeled segments.
    Circular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// X categories (linear) or segment labels (circular).
    pub x_axis_values: Vec<String>,
    pub datasets: Vec<Dataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_label: Option<String>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.x_axis_values.is_empty()
    }

    /// Finds a dataset by its label.
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

/// A successful projection: the data plus the kind it was projected as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProjection {
    pub chart_data: ChartData,
    pub chart_kind: ChartKind,
}

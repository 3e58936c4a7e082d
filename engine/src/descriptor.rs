//! FILENAME: engine/src/descriptor.rs
//! PURPOSE: The declarative chart configuration stored with a report.
//! CONTEXT: Shared by the pivot field resolver and the chart projector, and
//! parsed out of the persisted report configuration. The JSON shape is:
//!
//! ```json
//! {
//!   "type": "linear",
//!   "x_axis": { "field": "month" },
//!   "y_axis": { "field": "Sales, Returns" },
//!   "body_fields": ["sales", "returns"],
//!   "y_axis_label": "EUR"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Chart type as configured. Only `Linear` and `Circular` have dedicated
/// projections; everything else is projected like a linear chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Linear,
    Circular,
    Bubble,
    #[serde(other)]
    Other,
}

/// One axis of the descriptor. `field` names a column for the x axis, and a
/// comma-separated list of series labels for the y axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    #[serde(default)]
    pub field: Option<String>,
}

impl AxisDescriptor {
    pub fn new(field: impl Into<String>) -> Self {
        AxisDescriptor {
            field: Some(field.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    #[serde(rename = "type", default)]
    pub chart_type: Option<ChartType>,

    #[serde(default)]
    pub x_axis: Option<AxisDescriptor>,

    #[serde(default)]
    pub y_axis: Option<AxisDescriptor>,

    /// Columns supplying the numeric series, in display order.
    #[serde(default)]
    pub body_fields: Vec<String>,

    #[serde(default)]
    pub y_axis_label: Option<String>,
}

impl ChartDescriptor {
    pub fn new(chart_type: ChartType, x_field: impl Into<String>) -> Self {
        ChartDescriptor {
            chart_type: Some(chart_type),
            x_axis: Some(AxisDescriptor::new(x_field)),
            ..Default::default()
        }
    }

    pub fn with_body_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_y_axis_field(mut self, field: impl Into<String>) -> Self {
        self.y_axis = Some(AxisDescriptor::new(field));
        self
    }

    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = Some(label.into());
        self
    }

    /// The x-axis column name, if one is configured and non-blank.
    pub fn x_field(&self) -> Option<&str> {
        non_blank(self.x_axis.as_ref())
    }

    /// The raw y-axis field, if configured and non-blank.
    pub fn y_field(&self) -> Option<&str> {
        non_blank(self.y_axis.as_ref())
    }

    /// The y-axis field split into positional series labels.
    pub fn series_labels(&self) -> Vec<&str> {
        self.y_field()
            .map(|field| field.split(',').map(str::trim).collect())
            .unwrap_or_default()
    }
}

fn non_blank(axis: Option<&AxisDescriptor>) -> Option<&str> {
    axis.and_then(|a| a.field.as_deref())
        .filter(|f| !f.trim().is_empty())
}

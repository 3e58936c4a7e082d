//! FILENAME: pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! A pivot is described by three column names drawn from the source
//! `ResultSet` plus the aggregation to apply. These structures are:
//! - Serializable (chosen specs are stored alongside report state)
//! - Cheap to clone
//! - Immutable snapshots of user (or resolver) intent

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for the value field.
/// `None` means "do not pivot; show the raw rows".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregationType {
    Sum,
    Count,
    Average,
    Min,
    Max,
    None,
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::None
    }
}

impl AggregationType {
    pub const ALL: [AggregationType; 6] = [
        AggregationType::Sum,
        AggregationType::Count,
        AggregationType::Average,
        AggregationType::Min,
        AggregationType::Max,
        AggregationType::None,
    ];

    /// Human-readable name, as used in axis titles ("Sum of sales").
    pub fn label(&self) -> &'static str {
        match self {
            AggregationType::Sum => "Sum",
            AggregationType::Count => "Count",
            AggregationType::Average => "Average",
            AggregationType::Min => "Min",
            AggregationType::Max => "Max",
            AggregationType::None => "None",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, AggregationType::None)
    }
}

impl std::fmt::Display for AggregationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when an aggregation name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAggregation(pub String);

impl std::fmt::Display for UnknownAggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown aggregation: '{}'", self.0)
    }
}

impl std::error::Error for UnknownAggregation {}

impl FromStr for AggregationType {
    type Err = UnknownAggregation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(AggregationType::Sum),
            "count" => Ok(AggregationType::Count),
            "average" | "avg" => Ok(AggregationType::Average),
            "min" => Ok(AggregationType::Min),
            "max" => Ok(AggregationType::Max),
            "none" | "" => Ok(AggregationType::None),
            _ => Err(UnknownAggregation(s.to_string())),
        }
    }
}

// ============================================================================
// PIVOT SPEC
// ============================================================================

/// The (x, y, value, aggregation) tuple driving the pivot engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotSpec {
    /// Column whose distinct values become output rows.
    #[serde(default)]
    pub x_axis_field: Option<String>,

    /// Column whose distinct values become output columns.
    #[serde(default)]
    pub y_axis_field: Option<String>,

    /// Column that gets aggregated into each cell.
    #[serde(default)]
    pub value_field: Option<String>,

    #[serde(default)]
    pub aggregation: AggregationType,
}

impl PivotSpec {
    pub fn new(
        x_axis_field: impl Into<String>,
        y_axis_field: impl Into<String>,
        value_field: impl Into<String>,
        aggregation: AggregationType,
    ) -> Self {
        PivotSpec {
            x_axis_field: Some(x_axis_field.into()),
            y_axis_field: Some(y_axis_field.into()),
            value_field: Some(value_field.into()),
            aggregation,
        }
    }

    /// Returns the three field names when all are set and pairwise distinct.
    pub fn fields(&self) -> Option<(&str, &str, &str)> {
        let x = self.x_axis_field.as_deref()?;
        let y = self.y_axis_field.as_deref()?;
        let v = self.value_field.as_deref()?;
        if x == y || x == v || y == v {
            return None;
        }
        Some((x, y, v))
    }

    /// A spec is complete when all three fields are set, pairwise distinct,
    /// and an aggregation other than `None` is chosen.
    pub fn is_complete(&self) -> bool {
        !self.aggregation.is_none() && self.fields().is_some()
    }

    /// Axis title for charts built from this spec: "<Aggregation> of <value>".
    pub fn value_label(&self) -> String {
        format!(
            "{} of {}",
            self.aggregation.label(),
            self.value_field.as_deref().unwrap_or_default()
        )
    }
}

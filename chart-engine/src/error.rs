//! FILENAME: chart-engine/src/error.rs

use thiserror::Error;

/// Every way a chart projection can be refused. Each variant aborts the
/// projection; no partial chart data is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Cannot build a chart from an error or empty result")]
    SentinelResult,

    #[error("Chart configuration incomplete: type, x_axis.field and body_fields are required")]
    IncompleteConfiguration,

    #[error("X-axis field '{0}' not found in result columns")]
    MissingXAxisField(String),

    #[error("Data field '{0}' not found in result columns")]
    MissingValueField(String),

    #[error("Data fields not found in result columns: {}", .0.join(", "))]
    MissingValueFields(Vec<String>),
}

//! FILENAME: engine/src/lib.rs
//! PURPOSE: Shared types for the report pipeline.
//! CONTEXT: Every other crate in the workspace speaks in terms of these:
//! the cell value sum type, the validated `ResultSet`, the sentinel
//! convention, and the persisted `ChartDescriptor`.

pub mod cell;
pub mod descriptor;
pub mod result_set;

// Re-export commonly used types at the crate root
pub use cell::{format_number, CellValue};
pub use descriptor::{AxisDescriptor, ChartDescriptor, ChartType};
pub use result_set::{
    ResultSet, Sentinel, SentinelKind, ShapeError, ERROR_MARKERS, MESSAGE_MARKERS,
};

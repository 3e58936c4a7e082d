//! FILENAME: pivot-engine/src/lib.rs
//! Pivot subsystem for the report pipeline.
//!
//! Takes a tabular `ResultSet` and reshapes it into a dense 2-D aggregate:
//! distinct x-values become rows, distinct y-values become columns, and each
//! cell aggregates the value field over the rows that share that (x, y).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot IS)
//! - `accumulator`: Per-cell aggregation state (HOW we aggregate)
//! - `view`: Dense output for table/chart rendering (WHAT we display)
//! - `engine`: Calculation engine (HOW we calculate)
//! - `resolver`: Default field selection when the user configured nothing

pub mod definition;
pub mod accumulator;
pub mod view;
pub mod engine;
pub mod resolver;

pub use definition::*;
pub use accumulator::AggregateAccumulator;
pub use view::*;
pub use engine::{calculate_pivot, compare_keys, PassthroughReason, PivotOutcome};
pub use resolver::resolve_default_spec;

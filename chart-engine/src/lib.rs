//! FILENAME: chart-engine/src/lib.rs
//! Chart projection subsystem.
//!
//! Turns tabular report output into chart-ready series. It depends on
//! `pivot-engine` for pivoted input and on `engine` for shared types.
//!
//! Layers:
//! - `error`: Hard-fail configuration errors (no partial charts)
//! - `view`: Chart-ready output for the renderer (WHAT we display)
//! - `engine`: Result set + descriptor projection (HOW we project)
//! - `conversion`: Pivot -> chart series mapping

pub mod error;
pub mod view;
pub mod engine;
pub mod conversion;

pub use error::ChartError;
pub use view::*;
pub use engine::project_chart;
pub use conversion::pivot_to_chart;

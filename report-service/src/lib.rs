//! FILENAME: report-service/src/lib.rs
// PURPOSE: Report execution client and presentation pipeline.
// CONTEXT: Fetches a report result from the execution service and turns it
// into a table, pivot or chart through the engine crates.

pub mod logging;
pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use client::{ReportClient, ReportSession};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use logging::init_logging;
pub use pipeline::{present, table_headers, Presentation, PresentationMode};
pub use types::{merge_parameters, ExecuteRequest, ReportParameter};

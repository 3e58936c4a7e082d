//! FILENAME: persistence/src/lib.rs
//! Report Persistence Module
//!
//! Everything that crosses a storage or wire boundary as a blob:
//! - the persisted report configuration (parameters, grid columns, chart)
//! - the JSON payload returned by the report execution service
//! - plain XLSX export of result grids and pivots

mod error;
mod payload;
mod report_config;
mod xlsx_writer;

pub use error::PersistenceError;
pub use payload::{cell_from_json, decode_result_payload, encode_result_payload};
pub use report_config::{ColumnDefinition, ParameterDefinition, ReportConfig};
pub use xlsx_writer::{save_pivot_xlsx, save_result_set_xlsx};

//! FILENAME: report-service/src/pipeline.rs
// PURPOSE: Turns a fetched result into the view the caller asked for.
//
// Table mode passes the result through untouched. Pivot mode aggregates it
// (resolving a default spec when none is given) and derives a chart from a
// successful pivot. Chart mode projects the raw result through the report's
// chart descriptor.

use std::path::Path;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use engine::ResultSet;
use pivot_engine::{calculate_pivot, resolve_default_spec, PassthroughReason, PivotOutcome, PivotSpec};
use chart_engine::{pivot_to_chart, project_chart, ChartData, ChartError, ChartProjection};
use persistence::{save_pivot_xlsx, save_result_set_xlsx, ReportConfig};
use crate::{log_debug, log_info, ServiceError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    Table,
    /// `None` resolves a default spec from the result columns.
    Pivot(Option<PivotSpec>),
    Chart,
}

impl FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(PresentationMode::Table),
            "pivot" => Ok(PresentationMode::Pivot(None)),
            "chart" => Ok(PresentationMode::Chart),
            other => Err(format!("unknown mode '{}' (expected table, pivot or chart)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Table(ResultSet),
    Pivot {
        spec: PivotSpec,
        outcome: PivotOutcome,
        /// Present only when the pivot actually aggregated.
        chart: Option<ChartData>,
    },
    Chart(Result<ChartProjection, ChartError>),
}

pub fn present(result: ResultSet, config: &ReportConfig, mode: PresentationMode) -> Presentation {
    match mode {
        PresentationMode::Table => Presentation::Table(result),
        PresentationMode::Pivot(spec) => {
            let spec = spec
                .unwrap_or_else(|| resolve_default_spec(result.columns(), config.chart.as_ref()));
            log_debug!("PIPELINE", "pivot spec {:?}", spec);
            let outcome = calculate_pivot(&result, &spec);
            let chart = outcome.pivoted().map(|pivoted| pivot_to_chart(pivoted, &spec));
            Presentation::Pivot { spec, outcome, chart }
        }
        PresentationMode::Chart => {
            let projection = match config.chart.as_ref() {
                Some(descriptor) => project_chart(&result, descriptor),
                None => Err(ChartError::IncompleteConfiguration),
            };
            Presentation::Chart(projection)
        }
    }
}

/// Column headers for the table view, using configured header names.
pub fn table_headers(result: &ResultSet, config: &ReportConfig) -> Vec<String> {
    result
        .columns()
        .iter()
        .map(|c| config.header_for(c).unwrap_or(c).to_string())
        .collect()
}

fn passthrough_reason(reason: &PassthroughReason) -> String {
    match reason {
        PassthroughReason::IncompleteSpec => "incomplete pivot configuration".to_string(),
        PassthroughReason::MissingField(field) => format!("pivot field '{}' not in result", field),
        PassthroughReason::SentinelResult => "result is an error or message".to_string(),
    }
}

impl Presentation {
    /// Writes the tabular side of the presentation to an xlsx workbook:
    /// the result for a table, the pivot (or its raw rows on passthrough)
    /// for a pivot. A chart has no table to write.
    pub fn export_xlsx(&self, path: &Path) -> Result<(), ServiceError> {
        match self {
            Presentation::Table(result) => save_result_set_xlsx(result, "Report", path)?,
            Presentation::Pivot { outcome: PivotOutcome::Pivoted(pivoted), .. } => {
                save_pivot_xlsx(pivoted, "Pivot", path)?
            }
            Presentation::Pivot { outcome: PivotOutcome::Passthrough { result, .. }, .. } => {
                save_result_set_xlsx(result, "Report", path)?
            }
            Presentation::Chart(_) => {
                return Err(ServiceError::Config(
                    "chart presentations cannot be exported to xlsx".to_string(),
                ))
            }
        }
        log_info!("PIPELINE", "exported presentation to {}", path.display());
        Ok(())
    }

    /// JSON document printed by the command line tool.
    pub fn to_json(&self, config: &ReportConfig) -> JsonValue {
        match self {
            Presentation::Table(result) => json!({
                "view": "table",
                "headers": table_headers(result, config),
                "columns": result.columns(),
                "rows": result.rows(),
            }),
            Presentation::Pivot { spec, outcome, chart } => {
                let table = outcome.to_result_set();
                let passthrough = match outcome {
                    PivotOutcome::Pivoted(_) => None,
                    PivotOutcome::Passthrough { reason, .. } => Some(passthrough_reason(reason)),
                };
                json!({
                    "view": "pivot",
                    "spec": spec,
                    "passthrough": passthrough,
                    "columns": table.columns(),
                    "rows": table.rows(),
                    "chart": chart,
                })
            }
            Presentation::Chart(Ok(projection)) => json!({
                "view": "chart",
                "chart": projection,
            }),
            Presentation::Chart(Err(e)) => json!({
                "view": "chart",
                "error": e.to_string(),
            }),
        }
    }
}

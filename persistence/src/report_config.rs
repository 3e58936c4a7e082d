//! FILENAME: persistence/src/report_config.rs
//! Persisted per-report configuration blob.
//!
//! The blob is stored by the admin UI and read back verbatim, so it is
//! treated as untrusted: a blob that is not a JSON object yields an empty
//! configuration, and a malformed section is dropped on its own without
//! discarding the others.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use engine::ChartDescriptor;

/// One input parameter the report accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form input kind ("date", "number", "select", ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

/// One grid column as configured for the table view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub field: String,
    #[serde(
        default,
        rename = "headerName",
        alias = "header_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub header_name: Option<String>,
}

impl ColumnDefinition {
    /// Header text, falling back to the field name.
    pub fn header(&self) -> &str {
        self.header_name
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(&self.field)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub params: Vec<ParameterDefinition>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartDescriptor>,
}

impl ReportConfig {
    /// Parses a stored blob. Never fails.
    pub fn from_json(json: &str) -> Self {
        let object = match serde_json::from_str::<JsonValue>(json) {
            Ok(JsonValue::Object(object)) => object,
            Ok(_) => {
                log::warn!("report config is not a JSON object, ignoring it");
                return Self::default();
            }
            Err(e) => {
                log::warn!("report config is not valid JSON, ignoring it: {}", e);
                return Self::default();
            }
        };

        ReportConfig {
            params: section(&object, "params").unwrap_or_default(),
            columns: section(&object, "columns").unwrap_or_default(),
            chart: section(&object, "chart"),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The configured chart, if it has enough to render anything.
    pub fn chart_descriptor(&self) -> Option<&ChartDescriptor> {
        self.chart
            .as_ref()
            .filter(|c| c.chart_type.is_some() && c.x_field().is_some())
    }

    /// Configured header for `field`, if any.
    pub fn header_for(&self, field: &str) -> Option<&str> {
        self.columns.iter().find(|c| c.field == field).map(ColumnDefinition::header)
    }
}

fn section<T: DeserializeOwned>(object: &Map<String, JsonValue>, key: &str) -> Option<T> {
    let value = object.get(key).filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("report config section '{}' is malformed, ignoring it: {}", key, e);
            None
        }
    }
}

//! FILENAME: report-service/src/types.rs
// PURPOSE: Request types sent to the execution service.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use persistence::ReportConfig;
use crate::ServiceError;

/// One named report parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameter {
    pub name: String,
    pub value: JsonValue,
}

impl ReportParameter {
    pub fn new(name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        ReportParameter {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses a `name=value` argument. The value is sent as a string.
    pub fn parse(arg: &str) -> Result<Self, ServiceError> {
        match arg.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(Self::new(name.trim(), value.to_string()))
            }
            _ => Err(ServiceError::Config(format!(
                "parameter '{}' is not of the form name=value",
                arg
            ))),
        }
    }
}

/// Builds the parameter list for a run: every configured default, then
/// `overrides` replacing defaults of the same name or appended in order.
pub fn merge_parameters(config: &ReportConfig, overrides: Vec<ReportParameter>) -> Vec<ReportParameter> {
    let mut params: Vec<ReportParameter> = config
        .params
        .iter()
        .filter_map(|p| p.default.clone().map(|value| ReportParameter::new(p.name.clone(), value)))
        .collect();

    for param in overrides {
        match params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => existing.value = param.value,
            None => params.push(param),
        }
    }
    params
}

/// JSON body of an execution request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub report_id: String,
    pub params: Vec<ReportParameter>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_parameter() {
        let p = ReportParameter::parse("from=2024-01-01").unwrap();
        assert_eq!(p, ReportParameter::new("from", "2024-01-01"));

        let p = ReportParameter::parse("filter=a=b").unwrap();
        assert_eq!(p.value, json!("a=b"));

        assert!(ReportParameter::parse("novalue").is_err());
        assert!(ReportParameter::parse("=x").is_err());
    }

    #[test]
    fn test_merge_parameters() {
        let config = ReportConfig::from_json(
            r#"{"params": [
                {"name": "from", "default": "2024-01-01"},
                {"name": "region"},
                {"name": "limit", "default": 10}
            ]}"#,
        );
        let params = merge_parameters(
            &config,
            vec![ReportParameter::new("limit", "5"), ReportParameter::new("extra", true)],
        );
        assert_eq!(
            params,
            vec![
                ReportParameter::new("from", "2024-01-01"),
                ReportParameter::new("limit", "5"),
                ReportParameter::new("extra", true),
            ]
        );
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ExecuteRequest {
            report_id: "sales".to_string(),
            params: vec![ReportParameter::new("n", 1)],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"reportId": "sales", "params": [{"name": "n", "value": 1}]})
        );
    }
}

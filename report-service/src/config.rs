//! FILENAME: report-service/src/config.rs
// PURPOSE: Connection settings for the report execution service.

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::ServiceError;

pub const ENV_BASE_URL: &str = "REPORT_SERVICE_BASE_URL";
pub const ENV_LOG_PATH: &str = "REPORT_SERVICE_LOG";

fn default_execute_path() -> String {
    "/api/execute".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_execute_path")]
    pub execute_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ServiceConfig {
            base_url: base_url.into(),
            execute_path: default_execute_path(),
            timeout_secs: default_timeout_secs(),
            log_path: None,
        }
    }

    /// Reads a JSON config file, applies environment overrides, validates.
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(json).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Applies `REPORT_SERVICE_BASE_URL` / `REPORT_SERVICE_LOG` from `lookup`.
    /// Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(log_path) = lookup(ENV_LOG_PATH) {
            self.log_path = Some(PathBuf::from(log_path));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.timeout_secs == 0 {
            return Err(ServiceError::Config("timeout_secs must be positive".to_string()));
        }
        self.execute_url().map(|_| ())
    }

    /// `base_url` joined with `execute_path`; only http and https are accepted.
    pub fn execute_url(&self) -> Result<reqwest::Url, ServiceError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            self.execute_path.trim().trim_start_matches('/')
        );
        let url = reqwest::Url::parse(&joined)
            .map_err(|e| ServiceError::Config(format!("invalid base_url '{}': {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ServiceError::Config(format!(
                "unsupported scheme '{}' in base_url (only http/https allowed)",
                other
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

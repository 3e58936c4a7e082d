//! FILENAME: report-service/src/client.rs
// PURPOSE: HTTP client for the report execution service.

use std::sync::atomic::{AtomicU64, Ordering};
use engine::ResultSet;
use crate::config::ServiceConfig;
use crate::types::{ExecuteRequest, ReportParameter};
use crate::{log_enter_info, log_exit_info, log_info, log_warn, ServiceError};

pub struct ReportClient {
    http: reqwest::Client,
    execute_url: reqwest::Url,
}

impl ReportClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        let execute_url = config.execute_url()?;
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(ReportClient { http, execute_url })
    }

    pub fn execute_url(&self) -> &reqwest::Url {
        &self.execute_url
    }

    /// Runs a report once. A sentinel result comes back as
    /// `ServiceError::Backend`; nothing is retried.
    pub async fn execute(
        &self,
        report_id: &str,
        params: &[ReportParameter],
    ) -> Result<ResultSet, ServiceError> {
        log_enter_info!("CLIENT", "execute", "report={} params={}", report_id, params.len());

        let outcome = self.send_request(report_id, params).await;
        match &outcome {
            Ok(result) => log_exit_info!(
                "CLIENT",
                "execute",
                "report={} rows={} cols={}",
                report_id,
                result.row_count(),
                result.col_count()
            ),
            Err(e) => log_exit_info!("CLIENT", "execute", "report={} failed: {}", report_id, e),
        }
        outcome
    }

    async fn send_request(
        &self,
        report_id: &str,
        params: &[ReportParameter],
    ) -> Result<ResultSet, ServiceError> {
        let request = ExecuteRequest {
            report_id: report_id.to_string(),
            params: params.to_vec(),
        };
        let response = self
            .http
            .post(self.execute_url.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log_warn!("CLIENT", "report={} failed with HTTP {}", report_id, status.as_u16());
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        persistence::decode_result_payload(&body)?
            .into_outcome()
            .map_err(|sentinel| {
                log_warn!("CLIENT", "report={} {}", report_id, sentinel);
                ServiceError::Backend(sentinel)
            })
    }
}

/// Serialises user-visible runs: when a run finishes after a newer one has
/// started, its result is discarded. In-flight requests are not cancelled.
pub struct ReportSession {
    client: ReportClient,
    generation: AtomicU64,
}

impl ReportSession {
    pub fn new(client: ReportClient) -> Self {
        ReportSession {
            client,
            generation: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &ReportClient {
        &self.client
    }

    /// Generation of the most recently started run (0 before any run).
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn run(
        &self,
        report_id: &str,
        params: &[ReportParameter],
    ) -> Result<ResultSet, ServiceError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.client.execute(report_id, params).await;

        if self.current_generation() != generation {
            log_info!("SESSION", "run {} for report={} superseded", generation, report_id);
            return Err(ServiceError::Superseded);
        }
        outcome
    }
}

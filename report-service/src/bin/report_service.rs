//! FILENAME: report-service/src/bin/report_service.rs
// PURPOSE: Runs one report and prints the chosen presentation as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use engine::SentinelKind;
use persistence::ReportConfig;
use report_service::{
    init_logging, log_error, log_info, merge_parameters, present, PresentationMode,
    ReportClient, ReportParameter, ServiceConfig, ServiceError,
};

#[derive(Parser)]
#[command(name = "report-service")]
#[command(about = "Execute a report and print it as a table, pivot or chart.")]
struct Args {
    /// Service configuration file (JSON).
    config: PathBuf,

    /// Report to execute.
    report_id: String,

    /// Report parameters as name=value (repeatable).
    params: Vec<String>,

    /// table, pivot or chart. Defaults to chart when the report has a usable
    /// chart configuration, table otherwise.
    #[arg(long)]
    mode: Option<PresentationMode>,

    /// Stored report configuration (params, columns, chart).
    #[arg(long, value_name = "PATH")]
    report_config: Option<PathBuf>,

    /// Also write the table or pivot to an xlsx workbook.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

fn load_report_config(path: Option<&PathBuf>) -> Result<ReportConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read report config {}", path.display()))?;
            Ok(ReportConfig::from_json(&json))
        }
        None => Ok(ReportConfig::default()),
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = ServiceConfig::load(&args.config)?;
    init_logging(config.log_path.as_deref()).context("cannot open log file")?;

    let report_config = load_report_config(args.report_config.as_ref())?;
    let overrides = args
        .params
        .iter()
        .map(|p| ReportParameter::parse(p))
        .collect::<Result<Vec<_>, _>>()?;
    let params = merge_parameters(&report_config, overrides);

    let mode = args.mode.unwrap_or_else(|| {
        if report_config.chart_descriptor().is_some() {
            PresentationMode::Chart
        } else {
            PresentationMode::Table
        }
    });

    let client = ReportClient::new(&config)?;
    log_info!("MAIN", "executing report={} via {}", args.report_id, client.execute_url());

    match client.execute(&args.report_id, &params).await {
        Ok(result) => {
            let presentation = present(result, &report_config, mode);
            if let Some(path) = &args.export {
                presentation.export_xlsx(path)?;
            }
            println!("{}", serde_json::to_string_pretty(&presentation.to_json(&report_config))?);
            Ok(ExitCode::SUCCESS)
        }
        Err(ServiceError::Backend(sentinel)) => {
            println!("{}", serde_json::to_string_pretty(&sentinel)?);
            Ok(match sentinel.kind {
                SentinelKind::Message => ExitCode::SUCCESS,
                SentinelKind::Error => ExitCode::FAILURE,
            })
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            log_error!("MAIN", "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

//! FILENAME: report-service/src/error.rs

use thiserror::Error;
use engine::Sentinel;
use persistence::PersistenceError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Execution service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid result payload: {0}")]
    Payload(#[from] PersistenceError),

    #[error("{0}")]
    Backend(Sentinel),

    #[error("Execution was superseded by a newer run")]
    Superseded,
}

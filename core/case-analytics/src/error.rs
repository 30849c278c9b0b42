//! FILENAME: core/case-analytics/src/error.rs

use case_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid snapshot JSON: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("Invalid config JSON: {0}")]
    ConfigFormat(#[source] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

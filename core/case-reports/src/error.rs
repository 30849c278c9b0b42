//! FILENAME: core/case-reports/src/error.rs

use case_analytics::AnalyticsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid report definition JSON: {0}")]
    Definition(#[source] serde_json::Error),

    #[error("Failed to serialize report view: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

//! Report Sink Port - Interface for consuming finished analysis reports.

use async_trait::async_trait;

use crate::domain::evaluation::AnalysisReport;

/// Errors that can occur while publishing a report.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to serialize report: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for handing a report to its consumer.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Publish a finished report.
    ///
    /// # Errors
    /// Returns `SinkError` if the report cannot be delivered.
    async fn publish(&self, report: &AnalysisReport) -> Result<(), SinkError>;
}

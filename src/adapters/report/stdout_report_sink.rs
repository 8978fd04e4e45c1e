//! Stdout Report Sink Adapter
//!
//! Prints each report as pretty-printed JSON on standard output.

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::evaluation::AnalysisReport;
use crate::ports::{ReportSink, SinkError};

/// Report sink printing JSON to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReportSink;

impl StdoutReportSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportSink for StdoutReportSink {
    async fn publish(&self, report: &AnalysisReport) -> Result<(), SinkError> {
        let mut json = serde_json::to_string_pretty(report)
            .map_err(|e| SinkError::SerializationFailed(e.to_string()))?;
        json.push('\n');

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(json.as_bytes())
            .await
            .map_err(|e| SinkError::IoError(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| SinkError::IoError(e.to_string()))
    }
}

//! File-based Report Sink Adapter
//!
//! Writes each report as pretty-printed JSON to a fixed path, creating
//! parent directories as needed. A later report overwrites an earlier one.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::evaluation::AnalysisReport;
use crate::ports::{ReportSink, SinkError};

/// Report sink writing a JSON file
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReportSink for FileReportSink {
    async fn publish(&self, report: &AnalysisReport) -> Result<(), SinkError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| SinkError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(report)
            .map_err(|e| SinkError::SerializationFailed(e.to_string()))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| SinkError::IoError(e.to_string()))
    }
}

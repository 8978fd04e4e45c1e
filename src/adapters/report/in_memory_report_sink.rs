//! In-Memory Report Sink Adapter
//!
//! Keeps every published report in memory. Useful for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::evaluation::AnalysisReport;
use crate::ports::{ReportSink, SinkError};

/// In-memory report store
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportSink {
    reports: Arc<RwLock<Vec<AnalysisReport>>>,
}

impl InMemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports published so far, oldest first.
    pub async fn reports(&self) -> Vec<AnalysisReport> {
        self.reports.read().await.clone()
    }

    /// The most recent report.
    pub async fn last(&self) -> Option<AnalysisReport> {
        self.reports.read().await.last().cloned()
    }

    pub async fn count(&self) -> usize {
        self.reports.read().await.len()
    }

    /// Clear all stored reports (useful for tests)
    pub async fn clear(&self) {
        self.reports.write().await.clear();
    }
}

#[async_trait]
impl ReportSink for InMemoryReportSink {
    async fn publish(&self, report: &AnalysisReport) -> Result<(), SinkError> {
        self.reports.write().await.push(report.clone());
        Ok(())
    }
}

//! In-Memory Decision Source Adapter
//!
//! Serves records held in memory. Useful for testing and for hosts that
//! already parsed their input.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{DecisionRecords, DecisionSource, SourceError};

/// In-memory decision records
#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionSource {
    records: Arc<RwLock<Option<DecisionRecords>>>,
}

impl InMemoryDecisionSource {
    /// Create an empty source; loading fails until records are set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source serving `records`.
    pub fn with_records(records: DecisionRecords) -> Self {
        Self {
            records: Arc::new(RwLock::new(Some(records))),
        }
    }

    /// Replace the served records.
    pub async fn set(&self, records: DecisionRecords) {
        *self.records.write().await = Some(records);
    }
}

#[async_trait]
impl DecisionSource for InMemoryDecisionSource {
    async fn load(&self) -> Result<DecisionRecords, SourceError> {
        self.records
            .read()
            .await
            .clone()
            .ok_or_else(|| SourceError::NotFound("in-memory records".to_string()))
    }
}

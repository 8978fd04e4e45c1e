//! File-based Decision Source Adapter
//!
//! Reads decision records from a JSON or YAML file. The format is chosen by
//! file extension: `.json`, `.yaml` or `.yml`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{DecisionRecords, DecisionSource, SourceError};

/// Serialization format of a records file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordsFormat {
    Json,
    Yaml,
}

impl RecordsFormat {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(RecordsFormat::Json),
            "yaml" | "yml" => Some(RecordsFormat::Yaml),
            _ => None,
        }
    }

    /// Parses records text in this format.
    pub fn parse(&self, text: &str) -> Result<DecisionRecords, SourceError> {
        match self {
            RecordsFormat::Json => {
                serde_json::from_str(text).map_err(|e| SourceError::Malformed(e.to_string()))
            }
            RecordsFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| SourceError::Malformed(e.to_string()))
            }
        }
    }
}

/// Decision records stored in a single file
#[derive(Debug, Clone)]
pub struct FileDecisionSource {
    path: PathBuf,
}

impl FileDecisionSource {
    /// Create a source reading from `path`
    ///
    /// # Example
    /// ```ignore
    /// let source = FileDecisionSource::new("./decisions/proveedor.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DecisionSource for FileDecisionSource {
    async fn load(&self) -> Result<DecisionRecords, SourceError> {
        let format = RecordsFormat::from_path(&self.path)
            .ok_or_else(|| SourceError::UnsupportedFormat(self.path.display().to_string()))?;

        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.display().to_string()));
        }

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::IoError(e.to_string()))?;

        format.parse(&text)
    }
}

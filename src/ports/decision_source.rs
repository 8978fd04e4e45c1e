//! Decision Source Port - Interface for supplying raw decision records.
//!
//! Sources hand over loosely typed key-value records exactly as the user
//! authored them. Turning them into typed entities happens in the
//! application layer, never in adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One loosely typed record: field name to value.
pub type Record = Map<String, Value>;

/// Raw records for one decision.
///
/// Field names are the ones used by the authoring templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecords {
    /// `{Criterio, "Importancia (1-10)", Tipo}` rows.
    #[serde(default)]
    pub criterios: Vec<Record>,

    /// `{Alternativa, "<Criterio>_Min", "<Criterio>_Max" | "<Criterio>"}` rows.
    #[serde(default)]
    pub alternativas: Vec<Record>,

    /// `{Iteraciones, "Nombre Decision"}`; both optional.
    #[serde(default)]
    pub configuracion: Record,

    /// Criteria judgments `{"Criterio A", "Criterio B", Valor}`. Non-empty
    /// selects pairwise weighting.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparaciones: Vec<Record>,

    /// Alternatives judgments per criterion
    /// `{Criterio, "Alternativa A", "Alternativa B", Valor}`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparaciones_alternativas: Vec<Record>,
}

/// Errors that can occur while loading records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Decision records not found: {0}")]
    NotFound(String),

    #[error("Unsupported records format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse decision records: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading the records of one decision.
#[async_trait]
pub trait DecisionSource: Send + Sync {
    /// Load the raw records.
    ///
    /// # Errors
    /// Returns `SourceError` if the records cannot be read or parsed.
    async fn load(&self) -> Result<DecisionRecords, SourceError>;
}

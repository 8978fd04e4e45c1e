//! Fatal evaluation errors.
//!
//! Degenerate ranges, missing values and inconsistent comparisons are not
//! errors; they resolve to values and reports in the engine itself.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors that abort a single evaluation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("No {what} to evaluate")]
    EmptyInput { what: &'static str },

    #[error("Sum of criterion importances is zero")]
    DegenerateWeights,

    #[error("Comparison value at ({row}, {column}) must be positive, got {value}")]
    InvalidComparisonValue { row: usize, column: usize, value: f64 },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl AnalysisError {
    /// Creates an empty input error.
    pub fn empty(what: &'static str) -> Self {
        AnalysisError::EmptyInput { what }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::EmptyInput { .. } => ErrorCode::EmptyInput,
            AnalysisError::DegenerateWeights => ErrorCode::DegenerateWeights,
            AnalysisError::InvalidComparisonValue { .. } => ErrorCode::InvalidComparison,
            AnalysisError::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        AnalysisError::InvalidInput {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            AnalysisError::InvalidInput { field, .. } => domain.with_detail("field", field),
            AnalysisError::InvalidComparisonValue { row, column, .. } => domain
                .with_detail("row", row.to_string())
                .with_detail("column", column.to_string()),
            _ => domain,
        }
    }
}

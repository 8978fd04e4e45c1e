//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the decision engine.

mod direction;
mod errors;
mod ids;
mod precision;
mod risk_level;
mod timestamp;

pub use direction::Direction;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AnalysisId;
pub use precision::{round_report, round_to, REPORT_DECIMALS};
pub use risk_level::{RiskLevel, LOW_RISK_MAX_STDDEV, MEDIUM_RISK_MAX_STDDEV};
pub use timestamp::Timestamp;

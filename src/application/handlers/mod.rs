//! Application handlers.
//!
//! Command handlers that orchestrate the evaluation core and the ports.

pub mod analysis;

pub use analysis::{
    map_records, AnalysisSettings, MappedDecision, RunAnalysisCommand, RunAnalysisError,
    RunAnalysisHandler, RunAnalysisResult,
};

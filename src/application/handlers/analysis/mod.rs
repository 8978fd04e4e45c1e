//! Analysis command handlers.
//!
//! - `RunAnalysisHandler` - Load records, evaluate, publish the report
//! - `record_mapping` - Boundary parsing of loosely typed records

pub mod record_mapping;
mod run_analysis;

pub use record_mapping::{map_records, MappedDecision};
pub use run_analysis::{
    AnalysisSettings, RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler,
    RunAnalysisResult,
};

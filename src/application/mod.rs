//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates the evaluation core and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalysisSettings, RunAnalysisCommand, RunAnalysisError, RunAnalysisHandler,
    RunAnalysisResult,
};

//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the evaluation core and the outside world. Adapters implement these ports.
//!
//! - `DecisionSource` - Supplies raw criterion, alternative and configuration records
//! - `ReportSink` - Consumes the finished `AnalysisReport`

mod decision_source;
mod report_sink;

pub use decision_source::{DecisionRecords, DecisionSource, Record, SourceError};
pub use report_sink::{ReportSink, SinkError};

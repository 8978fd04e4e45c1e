//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the evaluation core to external systems:
//! - `records` - Decision record sources (file, in-memory)
//! - `report` - Report sinks (file, stdout, in-memory)

pub mod records;
pub mod report;

pub use records::{FileDecisionSource, InMemoryDecisionSource, RecordsFormat};
pub use report::{FileReportSink, InMemoryReportSink, StdoutReportSink};

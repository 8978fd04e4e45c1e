//! Report Sink Adapters
//!
//! Implementations of the ReportSink port.
//!
//! - **FileReportSink** - Writes pretty JSON to a file
//! - **StdoutReportSink** - Prints pretty JSON to standard output
//! - **InMemoryReportSink** - Keeps reports in memory (testing)

mod file_report_sink;
mod in_memory_report_sink;
mod stdout_report_sink;

pub use file_report_sink::FileReportSink;
pub use in_memory_report_sink::InMemoryReportSink;
pub use stdout_report_sink::StdoutReportSink;

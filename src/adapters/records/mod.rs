//! Decision Source Adapters
//!
//! Implementations of the DecisionSource port.
//!
//! - **FileDecisionSource** - Reads records from a JSON or YAML file
//! - **InMemoryDecisionSource** - Serves records held in memory (testing/embedding)

mod file_decision_source;
mod in_memory_decision_source;

pub use file_decision_source::{FileDecisionSource, RecordsFormat};
pub use in_memory_decision_source::InMemoryDecisionSource;

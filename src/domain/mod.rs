//! Domain layer containing the decision analysis logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `evaluation` - Pure quantitative services (weights, ranking, simulation, recommendation)

pub mod evaluation;
pub mod foundation;

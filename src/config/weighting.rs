//! Criterion weighting configuration

use serde::Deserialize;

/// Weighting configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WeightingConfig {
    /// Fail the run when a criteria comparison matrix exceeds the
    /// consistency threshold, instead of proceeding with a warning
    #[serde(default)]
    pub reject_inconsistent: bool,
}

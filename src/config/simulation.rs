//! Monte Carlo simulation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::evaluation::DEFAULT_ITERATIONS;

/// Simulation configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Iterations used when the decision records do not set `Iteraciones`
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Fixed generator seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Validate simulation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.iterations == 0 {
            return Err(ValidationError::InvalidIterations);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            seed: None,
        }
    }
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

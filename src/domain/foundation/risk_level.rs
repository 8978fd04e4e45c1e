//! Qualitative risk label derived from score dispersion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard deviation below which an alternative is considered low risk.
pub const LOW_RISK_MAX_STDDEV: f64 = 0.08;

/// Standard deviation below which an alternative is considered medium risk.
pub const MEDIUM_RISK_MAX_STDDEV: f64 = 0.15;

/// Risk label for a simulated score distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "BAJO")]
    Low,
    #[serde(rename = "MEDIO")]
    Medium,
    #[serde(rename = "ALTO")]
    High,
}

impl RiskLevel {
    /// Classifies a standard deviation.
    ///
    /// `< 0.08` is low, `< 0.15` is medium, anything else is high.
    pub fn classify(stddev: f64) -> Self {
        if stddev < LOW_RISK_MAX_STDDEV {
            RiskLevel::Low
        } else if stddev < MEDIUM_RISK_MAX_STDDEV {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Returns the display label for this risk level.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "BAJO",
            RiskLevel::Medium => "MEDIO",
            RiskLevel::High => "ALTO",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.0799), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.08), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(0.1499), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(0.15), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.5), RiskLevel::High);
    }

    #[test]
    fn serializes_to_spanish_label() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"ALTO\"");
        assert_eq!(RiskLevel::Medium.to_string(), "MEDIO");
    }
}

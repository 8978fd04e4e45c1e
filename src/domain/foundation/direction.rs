//! Criterion direction: whether larger raw values are desirable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Whether a criterion is a benefit (maximize) or a cost (minimize).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "maximizar")]
    Maximize,
    #[serde(rename = "minimizar")]
    Minimize,
}

impl Direction {
    /// Parses a `Tipo` label, accepting Spanish and English spellings in any case.
    pub fn parse(label: &str) -> Result<Self, ValidationError> {
        match label.trim().to_lowercase().as_str() {
            "maximizar" | "maximize" | "max" => Ok(Direction::Maximize),
            "minimizar" | "minimize" | "min" => Ok(Direction::Minimize),
            other => Err(ValidationError::invalid_format(
                "Tipo",
                format!("expected 'minimizar' or 'maximizar', got '{}'", other),
            )),
        }
    }

    /// Returns the record label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Maximize => "maximizar",
            Direction::Minimize => "minimizar",
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::parse(s)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_record_labels() {
        assert_eq!(Direction::parse("minimizar").unwrap(), Direction::Minimize);
        assert_eq!(Direction::parse("maximizar").unwrap(), Direction::Maximize);
    }

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!(Direction::parse("  MINIMIZAR ").unwrap(), Direction::Minimize);
        assert_eq!(Direction::parse("Maximize").unwrap(), Direction::Maximize);
    }

    #[test]
    fn parse_rejects_unknown_label() {
        let err = Direction::parse("beneficio").unwrap_err();
        assert_eq!(err.field(), "Tipo");
    }

    #[test]
    fn serializes_to_record_label() {
        assert_eq!(serde_json::to_string(&Direction::Minimize).unwrap(), "\"minimizar\"");
        let parsed: Direction = serde_json::from_str("\"maximizar\"").unwrap();
        assert_eq!(parsed, Direction::Maximize);
    }
}

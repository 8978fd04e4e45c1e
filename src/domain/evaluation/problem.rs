//! Decision Problem - Criteria and alternatives evaluated in one run.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::AnalysisError;
use crate::domain::foundation::{Direction, ValidationError};

/// Closed interval `[min, max]` expressing measurement uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Creates an interval, rejecting non-finite bounds and `min > max`.
    ///
    /// Width and midpoint must also be finite, so every accepted interval
    /// can be sampled and ranked.
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ValidationError::invalid_format("interval", "bounds must be finite"));
        }
        if min > max {
            return Err(ValidationError::invalid_format(
                "interval",
                format!("min {} is greater than max {}", min, max),
            ));
        }
        if !(max - min).is_finite() || !(min + max).is_finite() {
            return Err(ValidationError::invalid_format(
                "interval",
                format!("[{}, {}] is too wide to evaluate", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    /// Creates a zero-width interval.
    pub fn point(value: f64) -> Self {
        Self { min: value, max: value }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Returns true if the interval has zero width.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// What an alternative declares for a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CriterionValue {
    Scalar(f64),
    Range(Interval),
    /// No data supplied; evaluates as 0.0.
    Missing,
}

impl CriterionValue {
    /// Value used by the deterministic ranking: midpoint, scalar, or 0.0.
    pub fn representative(&self) -> f64 {
        match self {
            CriterionValue::Scalar(v) => *v,
            CriterionValue::Range(interval) => interval.midpoint(),
            CriterionValue::Missing => 0.0,
        }
    }

    /// Interval sampled by the simulator. Scalars and missing values are
    /// zero-width.
    pub fn interval(&self) -> Interval {
        match self {
            CriterionValue::Scalar(v) => Interval::point(*v),
            CriterionValue::Range(interval) => *interval,
            CriterionValue::Missing => Interval::point(0.0),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CriterionValue::Missing)
    }
}

/// A criterion alternatives are judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub direction: Direction,
    /// Raw importance for direct weighting. Not needed on the pairwise path,
    /// where the criterion's position in the problem is its matrix index.
    pub importance: Option<f64>,
}

impl Criterion {
    /// Creates a criterion without an importance.
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            importance: None,
        }
    }

    /// Creates a criterion with a raw importance.
    pub fn with_importance(name: impl Into<String>, direction: Direction, importance: f64) -> Self {
        Self {
            name: name.into(),
            direction,
            importance: Some(importance),
        }
    }
}

/// A competing alternative and its per-criterion values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    values: HashMap<String, CriterionValue>,
}

impl Alternative {
    /// Creates an alternative with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Adds a value for a criterion.
    pub fn with_value(mut self, criterion: impl Into<String>, value: CriterionValue) -> Self {
        self.set_value(criterion, value);
        self
    }

    /// Adds a scalar value for a criterion.
    pub fn with_scalar(self, criterion: impl Into<String>, value: f64) -> Self {
        self.with_value(criterion, CriterionValue::Scalar(value))
    }

    /// Adds a range for a criterion.
    pub fn with_range(
        self,
        criterion: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Result<Self, ValidationError> {
        let interval = Interval::new(min, max)?;
        Ok(self.with_value(criterion, CriterionValue::Range(interval)))
    }

    /// Sets the value for a criterion, replacing any previous one.
    pub fn set_value(&mut self, criterion: impl Into<String>, value: CriterionValue) {
        self.values.insert(criterion.into(), value);
    }

    /// Gets the value for a criterion, `Missing` if none was declared.
    pub fn value(&self, criterion: &str) -> CriterionValue {
        self.values
            .get(criterion)
            .copied()
            .unwrap_or(CriterionValue::Missing)
    }
}

/// Complete, validated input for one analysis run.
///
/// Invariants: at least one criterion and one alternative, names unique and
/// non-empty within each set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionProblem {
    name: String,
    criteria: Vec<Criterion>,
    alternatives: Vec<Alternative>,
}

impl DecisionProblem {
    /// Creates a validated decision problem.
    pub fn new(
        name: impl Into<String>,
        criteria: Vec<Criterion>,
        alternatives: Vec<Alternative>,
    ) -> Result<Self, AnalysisError> {
        if criteria.is_empty() {
            return Err(AnalysisError::empty("criteria"));
        }
        if alternatives.is_empty() {
            return Err(AnalysisError::empty("alternatives"));
        }

        ensure_unique("Criterio", criteria.iter().map(|c| c.name.as_str()))?;
        ensure_unique("Alternativa", alternatives.iter().map(|a| a.name.as_str()))?;

        Ok(Self {
            name: name.into(),
            criteria,
            alternatives,
        })
    }

    /// Creates a builder for constructing a decision problem.
    pub fn builder() -> DecisionProblemBuilder {
        DecisionProblemBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Returns the number of criteria.
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Iterates `(alternative, criterion)` pairs whose value is missing.
    pub fn missing_values(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.alternatives.iter().flat_map(move |alt| {
            self.criteria
                .iter()
                .filter(move |c| alt.value(&c.name).is_missing())
                .map(move |c| (alt.name.as_str(), c.name.as_str()))
        })
    }
}

fn ensure_unique<'a>(
    field: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), AnalysisError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field(field).into());
        }
        if !seen.insert(name) {
            return Err(AnalysisError::invalid_input(
                field,
                format!("duplicate name '{}'", name),
            ));
        }
    }
    Ok(())
}

/// Builder for constructing DecisionProblem instances.
#[derive(Debug, Default)]
pub struct DecisionProblemBuilder {
    name: String,
    criteria: Vec<Criterion>,
    alternatives: Vec<Alternative>,
}

impl DecisionProblemBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            name: "Decision".to_string(),
            ..Self::default()
        }
    }

    /// Sets the decision name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a criterion with a raw importance.
    pub fn criterion(
        mut self,
        name: impl Into<String>,
        direction: Direction,
        importance: f64,
    ) -> Self {
        self.criteria
            .push(Criterion::with_importance(name, direction, importance));
        self
    }

    /// Adds an alternative.
    pub fn alternative(mut self, alternative: Alternative) -> Self {
        self.alternatives.push(alternative);
        self
    }

    /// Builds and validates the problem.
    pub fn build(self) -> Result<DecisionProblem, AnalysisError> {
        DecisionProblem::new(self.name, self.criteria, self.alternatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier_problem() -> DecisionProblem {
        DecisionProblem::builder()
            .name("Proveedor")
            .criterion("Costo", Direction::Minimize, 9.0)
            .criterion("Calidad", Direction::Maximize, 7.0)
            .alternative(
                Alternative::new("A")
                    .with_range("Costo", 90.0, 110.0)
                    .unwrap()
                    .with_scalar("Calidad", 5.0),
            )
            .alternative(Alternative::new("B").with_scalar("Costo", 200.0))
            .build()
            .unwrap()
    }

    #[test]
    fn interval_rejects_inverted_bounds() {
        assert!(Interval::new(5.0, 1.0).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
        assert!(Interval::new(1.0, 1.0).unwrap().is_degenerate());
    }

    #[test]
    fn interval_rejects_overflowing_width_or_midpoint() {
        assert!(Interval::new(-1e308, 1e308).is_err());
        assert!(Interval::new(1e308, 1.7e308).is_err());
        assert!(Alternative::new("A").with_range("Costo", -1e308, 1e308).is_err());

        let wide = Interval::new(-1e300, 1e300).unwrap();
        assert_eq!(wide.midpoint(), 0.0);
    }

    #[test]
    fn representative_value_uses_midpoint_scalar_or_zero() {
        let range = CriterionValue::Range(Interval::new(100.0, 200.0).unwrap());
        assert_eq!(range.representative(), 150.0);
        assert_eq!(CriterionValue::Scalar(7.0).representative(), 7.0);
        assert_eq!(CriterionValue::Missing.representative(), 0.0);
    }

    #[test]
    fn scalar_and_missing_sample_as_points() {
        assert_eq!(CriterionValue::Scalar(3.0).interval(), Interval::point(3.0));
        assert_eq!(CriterionValue::Missing.interval(), Interval::point(0.0));
    }

    #[test]
    fn undeclared_value_is_missing() {
        let problem = supplier_problem();
        let b = &problem.alternatives()[1];
        assert!(b.value("Calidad").is_missing());
        let missing: Vec<_> = problem.missing_values().collect();
        assert_eq!(missing, vec![("B", "Calidad")]);
    }

    #[test]
    fn build_rejects_empty_criteria() {
        let err = DecisionProblem::builder()
            .alternative(Alternative::new("A"))
            .build()
            .unwrap_err();
        assert_eq!(err, AnalysisError::empty("criteria"));
    }

    #[test]
    fn build_rejects_empty_alternatives() {
        let err = DecisionProblem::builder()
            .criterion("Costo", Direction::Minimize, 1.0)
            .build()
            .unwrap_err();
        assert_eq!(err, AnalysisError::empty("alternatives"));
    }

    #[test]
    fn build_rejects_duplicate_criterion_names() {
        let err = DecisionProblem::builder()
            .criterion("Costo", Direction::Minimize, 1.0)
            .criterion("Costo", Direction::Maximize, 2.0)
            .alternative(Alternative::new("A"))
            .build()
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Criterio"));
    }

    #[test]
    fn build_rejects_blank_alternative_name() {
        let err = DecisionProblem::builder()
            .criterion("Costo", Direction::Minimize, 1.0)
            .alternative(Alternative::new("  "))
            .build()
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Alternativa"));
    }

    #[test]
    fn builder_preserves_input_order() {
        let problem = supplier_problem();
        assert_eq!(problem.name(), "Proveedor");
        assert_eq!(problem.criteria()[0].name, "Costo");
        assert_eq!(problem.alternatives()[1].name, "B");
        assert_eq!(problem.criterion_count(), 2);
        assert_eq!(problem.alternative_count(), 2);
    }
}

//! Record mapping - Loosely typed decision records to typed entities.
//!
//! Every untyped lookup ends here. Dynamically named fields such as
//! `Costo_Min` are resolved against the declared criteria, numbers may arrive
//! as JSON numbers or numeric strings, and anything that cannot be read is an
//! `InvalidInput` naming the offending field.

use serde_json::Value;
use std::collections::HashMap;

use crate::domain::evaluation::{
    Alternative, AlternativeComparisons, AnalysisError, Criterion, CriterionValue,
    DecisionProblem, Interval, PairwiseMatrix, WeightingStrategy,
};
use crate::domain::foundation::{Direction, ValidationError};
use crate::ports::{DecisionRecords, Record};

pub const FIELD_CRITERION: &str = "Criterio";
pub const FIELD_IMPORTANCE: &str = "Importancia (1-10)";
pub const FIELD_DIRECTION: &str = "Tipo";
pub const FIELD_ALTERNATIVE: &str = "Alternativa";
pub const FIELD_ITERATIONS: &str = "Iteraciones";
pub const FIELD_DECISION_NAME: &str = "Nombre Decision";
pub const FIELD_CRITERION_A: &str = "Criterio A";
pub const FIELD_CRITERION_B: &str = "Criterio B";
pub const FIELD_ALTERNATIVE_A: &str = "Alternativa A";
pub const FIELD_ALTERNATIVE_B: &str = "Alternativa B";
pub const FIELD_VALUE: &str = "Valor";

const MIN_SUFFIX: &str = "_Min";
const MAX_SUFFIX: &str = "_Max";

const DEFAULT_DECISION_NAME: &str = "Decision";

/// Typed input for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedDecision {
    pub problem: DecisionProblem,
    pub strategy: WeightingStrategy,
    /// Per-criterion alternatives matrices, when the records judge alternatives.
    pub alternative_comparisons: Option<AlternativeComparisons>,
    /// `Iteraciones`, when the records set it.
    pub iterations: Option<usize>,
}

/// Maps decision records into a [`MappedDecision`].
///
/// # Errors
/// - Unreadable or missing required fields: `InvalidInput`
/// - No criteria or no alternatives: `EmptyInput`
/// - A judgment value ≤ 0: `InvalidComparisonValue`
pub fn map_records(records: &DecisionRecords) -> Result<MappedDecision, AnalysisError> {
    let criteria = records
        .criterios
        .iter()
        .map(map_criterion)
        .collect::<Result<Vec<_>, _>>()?;

    let alternatives = records
        .alternativas
        .iter()
        .map(|record| map_alternative(record, &criteria))
        .collect::<Result<Vec<_>, _>>()?;

    let name = text(&records.configuracion, FIELD_DECISION_NAME)
        .unwrap_or_else(|| DEFAULT_DECISION_NAME.to_string());
    let iterations = iterations(&records.configuracion)?;

    let problem = DecisionProblem::new(name, criteria, alternatives)?;

    let strategy = if records.comparaciones.is_empty() {
        WeightingStrategy::Direct
    } else {
        WeightingStrategy::Pairwise(criteria_matrix(&records.comparaciones, &problem)?)
    };

    let alternative_comparisons = if records.comparaciones_alternativas.is_empty() {
        None
    } else {
        Some(alternative_matrices(&records.comparaciones_alternativas, &problem)?)
    };

    Ok(MappedDecision {
        problem,
        strategy,
        alternative_comparisons,
        iterations,
    })
}

fn map_criterion(record: &Record) -> Result<Criterion, AnalysisError> {
    let name = required_text(record, FIELD_CRITERION)?;
    let direction = Direction::parse(&required_text(record, FIELD_DIRECTION)?)?;

    let mut criterion = Criterion::new(name, direction);
    if let Some(importance) = number(record, FIELD_IMPORTANCE)? {
        if importance < 0.0 {
            return Err(AnalysisError::invalid_input(
                FIELD_IMPORTANCE,
                format!(
                    "importance of '{}' must be non-negative, got {}",
                    criterion.name, importance
                ),
            ));
        }
        criterion.importance = Some(importance);
    }
    Ok(criterion)
}

fn map_alternative(record: &Record, criteria: &[Criterion]) -> Result<Alternative, AnalysisError> {
    let mut alternative = Alternative::new(required_text(record, FIELD_ALTERNATIVE)?);

    for criterion in criteria {
        let min_field = format!("{}{}", criterion.name, MIN_SUFFIX);
        let max_field = format!("{}{}", criterion.name, MAX_SUFFIX);

        let value = match (number(record, &min_field)?, number(record, &max_field)?) {
            (Some(min), Some(max)) => {
                let interval = Interval::new(min, max).map_err(|e| {
                    AnalysisError::invalid_input(
                        criterion.name.clone(),
                        format!("{}: {}", alternative.name, e),
                    )
                })?;
                CriterionValue::Range(interval)
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(AnalysisError::invalid_input(
                    criterion.name.clone(),
                    format!(
                        "{} declares only one of {} and {}",
                        alternative.name, min_field, max_field
                    ),
                ));
            }
            (None, None) => match number(record, &criterion.name)? {
                Some(v) => CriterionValue::Scalar(v),
                None => CriterionValue::Missing,
            },
        };

        if !value.is_missing() {
            alternative.set_value(criterion.name.clone(), value);
        }
    }

    Ok(alternative)
}

fn iterations(config: &Record) -> Result<Option<usize>, AnalysisError> {
    let Some(value) = number(config, FIELD_ITERATIONS)? else {
        return Ok(None);
    };
    if value < 1.0 || value.fract() != 0.0 || value > usize::MAX as f64 {
        return Err(AnalysisError::invalid_input(
            FIELD_ITERATIONS,
            format!("must be an integer of at least 1, got {}", value),
        ));
    }
    Ok(Some(value as usize))
}

fn criteria_matrix(
    judgments: &[Record],
    problem: &DecisionProblem,
) -> Result<PairwiseMatrix, AnalysisError> {
    let index: HashMap<&str, usize> = problem
        .criteria()
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let entries = judgments
        .iter()
        .map(|record| {
            let a = lookup(&index, record, FIELD_CRITERION_A)?;
            let b = lookup(&index, record, FIELD_CRITERION_B)?;
            Ok((a, b, required_number(record, FIELD_VALUE)?))
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    PairwiseMatrix::from_judgments(problem.criterion_count(), &entries)
}

fn alternative_matrices(
    judgments: &[Record],
    problem: &DecisionProblem,
) -> Result<AlternativeComparisons, AnalysisError> {
    let index: HashMap<&str, usize> = problem
        .alternatives()
        .iter()
        .enumerate()
        .map(|(i, a)| (a.name.as_str(), i))
        .collect();

    let mut by_criterion: Vec<(&str, Vec<(usize, usize, f64)>)> = problem
        .criteria()
        .iter()
        .map(|c| (c.name.as_str(), Vec::new()))
        .collect();

    for record in judgments {
        let criterion = required_text(record, FIELD_CRITERION)?;
        let entries = by_criterion
            .iter_mut()
            .find(|(name, _)| *name == criterion)
            .map(|(_, entries)| entries)
            .ok_or_else(|| {
                AnalysisError::invalid_input(
                    FIELD_CRITERION,
                    format!("unknown criterion '{}'", criterion),
                )
            })?;

        let a = lookup(&index, record, FIELD_ALTERNATIVE_A)?;
        let b = lookup(&index, record, FIELD_ALTERNATIVE_B)?;
        entries.push((a, b, required_number(record, FIELD_VALUE)?));
    }

    let mut comparisons = AlternativeComparisons::new();
    for (criterion, entries) in by_criterion {
        if entries.is_empty() {
            continue;
        }
        let matrix = PairwiseMatrix::from_judgments(problem.alternative_count(), &entries)?;
        comparisons.insert(criterion, matrix);
    }
    Ok(comparisons)
}

fn lookup(
    index: &HashMap<&str, usize>,
    record: &Record,
    field: &str,
) -> Result<usize, AnalysisError> {
    let name = required_text(record, field)?;
    index
        .get(name.as_str())
        .copied()
        .ok_or_else(|| AnalysisError::invalid_input(field, format!("unknown name '{}'", name)))
}

/// Reads a text field. Numbers are accepted and rendered as text.
fn text(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(record: &Record, field: &str) -> Result<String, AnalysisError> {
    text(record, field).ok_or_else(|| ValidationError::empty_field(field).into())
}

/// Reads a numeric field. Absent, null and blank fields are `None`.
fn number(record: &Record, field: &str) -> Result<Option<f64>, AnalysisError> {
    let parsed = match record.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ValidationError::invalid_format(field, "expected a finite number").into()),
    }
}

fn required_number(record: &Record, field: &str) -> Result<f64, AnalysisError> {
    number(record, field)?.ok_or_else(|| ValidationError::empty_field(field).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> DecisionRecords {
        serde_json::from_value(value).unwrap()
    }

    fn supplier_records() -> DecisionRecords {
        records(json!({
            "criterios": [
                {"Criterio": "Costo", "Importancia (1-10)": 9, "Tipo": "minimizar"},
                {"Criterio": "Calidad", "Importancia (1-10)": "7", "Tipo": "Maximizar"}
            ],
            "alternativas": [
                {"Alternativa": "A", "Costo_Min": 100, "Costo_Max": 120, "Calidad": 5},
                {"Alternativa": "B", "Costo_Min": "200", "Costo_Max": "210"}
            ],
            "configuracion": {"Iteraciones": 500, "Nombre Decision": "Proveedor"}
        }))
    }

    #[test]
    fn maps_criteria_alternatives_and_configuration() {
        let mapped = map_records(&supplier_records()).unwrap();
        let problem = &mapped.problem;

        assert_eq!(problem.name(), "Proveedor");
        assert_eq!(mapped.iterations, Some(500));
        assert_eq!(mapped.strategy, WeightingStrategy::Direct);
        assert!(mapped.alternative_comparisons.is_none());

        assert_eq!(problem.criteria()[0].direction, Direction::Minimize);
        assert_eq!(problem.criteria()[1].direction, Direction::Maximize);
        assert_eq!(problem.criteria()[1].importance, Some(7.0));

        let a = &problem.alternatives()[0];
        assert_eq!(
            a.value("Costo"),
            CriterionValue::Range(Interval::new(100.0, 120.0).unwrap())
        );
        assert_eq!(a.value("Calidad"), CriterionValue::Scalar(5.0));

        let b = &problem.alternatives()[1];
        assert_eq!(b.value("Costo").representative(), 205.0);
        assert!(b.value("Calidad").is_missing());
    }

    #[test]
    fn configuration_defaults() {
        let mut input = supplier_records();
        input.configuracion.clear();

        let mapped = map_records(&input).unwrap();
        assert_eq!(mapped.problem.name(), "Decision");
        assert_eq!(mapped.iterations, None);
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": 1, "Tipo": "reducir"}],
            "alternativas": [{"Alternativa": "A", "Costo": 1}]
        }));
        let err = map_records(&input).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Tipo"));
    }

    #[test]
    fn negative_importance_is_rejected() {
        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": -2, "Tipo": "minimizar"}],
            "alternativas": [{"Alternativa": "A", "Costo": 1}]
        }));
        assert!(matches!(
            map_records(&input),
            Err(AnalysisError::InvalidInput { .. })
        ));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": 1, "Tipo": "minimizar"}],
            "alternativas": [{"Alternativa": "A", "Costo_Min": "cheap", "Costo_Max": 10}]
        }));
        let err = map_records(&input).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Costo_Min"));
    }

    #[test]
    fn incomplete_range_is_rejected() {
        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": 1, "Tipo": "minimizar"}],
            "alternativas": [{"Alternativa": "A", "Costo_Min": 10}]
        }));
        let err = map_records(&input).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Costo"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": 1, "Tipo": "minimizar"}],
            "alternativas": [{"Alternativa": "A", "Costo_Min": 20, "Costo_Max": 10}]
        }));
        assert!(matches!(
            map_records(&input),
            Err(AnalysisError::InvalidInput { .. })
        ));
    }

    #[test]
    fn overflowing_range_is_rejected_naming_criterion() {
        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": 1, "Tipo": "minimizar"}],
            "alternativas": [{"Alternativa": "A", "Costo_Min": -1e308, "Costo_Max": 1e308}]
        }));
        let err = map_records(&input).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Costo"));
    }

    #[test]
    fn empty_lists_are_empty_input() {
        let input = records(json!({
            "criterios": [],
            "alternativas": [{"Alternativa": "A"}]
        }));
        assert_eq!(map_records(&input).unwrap_err(), AnalysisError::empty("criteria"));

        let input = records(json!({
            "criterios": [{"Criterio": "Costo", "Importancia (1-10)": 1, "Tipo": "minimizar"}],
            "alternativas": []
        }));
        assert_eq!(map_records(&input).unwrap_err(), AnalysisError::empty("alternatives"));
    }

    #[test]
    fn invalid_iterations_are_rejected() {
        for bad in [json!(0), json!(2.5), json!("many")] {
            let mut input = supplier_records();
            input.configuracion.insert(FIELD_ITERATIONS.to_string(), bad);
            assert!(map_records(&input).is_err());
        }
    }

    #[test]
    fn comparisons_select_pairwise_weighting() {
        let mut input = supplier_records();
        input.comparaciones = vec![json!({"Criterio A": "Costo", "Criterio B": "Calidad", "Valor": 3})
            .as_object()
            .unwrap()
            .clone()];

        let mapped = map_records(&input).unwrap();
        match mapped.strategy {
            WeightingStrategy::Pairwise(matrix) => {
                assert_eq!(matrix.get(0, 1), 3.0);
                assert!((matrix.get(1, 0) - 1.0 / 3.0).abs() < 1e-12);
            }
            other => panic!("expected pairwise weighting, got {:?}", other),
        }
    }

    #[test]
    fn non_positive_comparison_is_invalid_comparison_value() {
        let mut input = supplier_records();
        input.comparaciones = vec![json!({"Criterio A": "Calidad", "Criterio B": "Costo", "Valor": 0})
            .as_object()
            .unwrap()
            .clone()];

        assert_eq!(
            map_records(&input).unwrap_err(),
            AnalysisError::InvalidComparisonValue { row: 1, column: 0, value: 0.0 }
        );
    }

    #[test]
    fn comparison_with_unknown_criterion_is_rejected() {
        let mut input = supplier_records();
        input.comparaciones = vec![json!({"Criterio A": "Plazo", "Criterio B": "Costo", "Valor": 2})
            .as_object()
            .unwrap()
            .clone()];

        let err = map_records(&input).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Criterio A"));
    }

    #[test]
    fn alternative_judgments_are_grouped_by_criterion() {
        let mut input = supplier_records();
        input.comparaciones_alternativas = [
            json!({"Criterio": "Costo", "Alternativa A": "A", "Alternativa B": "B", "Valor": 5}),
            json!({"Criterio": "Calidad", "Alternativa A": "B", "Alternativa B": "A", "Valor": 2}),
        ]
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();

        let comparisons = map_records(&input).unwrap().alternative_comparisons.unwrap();
        assert_eq!(comparisons.get("Costo").unwrap().get(0, 1), 5.0);
        assert_eq!(comparisons.get("Calidad").unwrap().get(1, 0), 2.0);
        assert_eq!(comparisons.get("Calidad").unwrap().get(0, 1), 0.5);
    }
}

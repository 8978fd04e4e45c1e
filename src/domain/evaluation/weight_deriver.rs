//! Weight Deriver - Criterion weights from direct importances or pairwise comparisons.
//!
//! # Strategies
//!
//! - Direct: `weight(c) = importance(c) / Σ importance`
//! - Pairwise (AHP): column-normalize the reciprocal matrix, then average each
//!   row. The consistency ratio is reported alongside the weights; an
//!   inconsistent matrix is a warning the caller acts on, never an error.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{AnalysisError, Criterion};

/// Saaty's random index for matrix sizes 1 through 10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Consistency ratio at or below which comparisons are accepted.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Maximum deviation of `a[i][j] * a[j][i]` from 1.
pub const RECIPROCITY_TOLERANCE: f64 = 1e-6;

/// Returns the random index for an `n x n` matrix. Sizes above 10 use the
/// value for 10.
pub fn random_index(n: usize) -> f64 {
    match n {
        0 => 0.0,
        n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
        _ => RANDOM_INDEX[RANDOM_INDEX.len() - 1],
    }
}

/// Normalized criterion weights in criterion order. Sums to 1.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightVector {
    entries: Vec<(String, f64)>,
}

impl WeightVector {
    fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Gets the weight of a criterion.
    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == criterion)
            .map(|(_, w)| *w)
    }

    /// Iterates `(criterion, weight)` in criterion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, w)| (name.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

impl Serialize for WeightVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, weight) in &self.entries {
            map.serialize_entry(name, weight)?;
        }
        map.end()
    }
}

/// Square reciprocal comparison matrix.
///
/// Invariants: diagonal is 1, `a[i][j] = 1 / a[j][i]`, all entries positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseMatrix {
    values: Vec<Vec<f64>>,
}

impl PairwiseMatrix {
    /// Validates a full matrix.
    pub fn new(values: Vec<Vec<f64>>) -> Result<Self, AnalysisError> {
        let n = values.len();
        if n == 0 {
            return Err(AnalysisError::empty("comparisons"));
        }

        for (i, row) in values.iter().enumerate() {
            if row.len() != n {
                return Err(AnalysisError::invalid_input(
                    "matrix",
                    format!("row {} has {} entries, expected {}", i, row.len(), n),
                ));
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(AnalysisError::InvalidComparisonValue { row: i, column: j, value });
                }
            }
        }

        for i in 0..n {
            if (values[i][i] - 1.0).abs() > RECIPROCITY_TOLERANCE {
                return Err(AnalysisError::invalid_input(
                    "matrix",
                    format!("diagonal entry ({}, {}) must be 1, got {}", i, i, values[i][i]),
                ));
            }
            for j in (i + 1)..n {
                if (values[i][j] * values[j][i] - 1.0).abs() > RECIPROCITY_TOLERANCE {
                    return Err(AnalysisError::invalid_input(
                        "matrix",
                        format!("entries ({}, {}) and ({}, {}) are not reciprocal", i, j, j, i),
                    ));
                }
            }
        }

        Ok(Self { values })
    }

    /// Builds a matrix from upper-triangle judgments `(i, j, value)`, meaning
    /// "i is `value` times as important as j". Pairs not judged stay at 1.
    pub fn from_judgments(n: usize, judgments: &[(usize, usize, f64)]) -> Result<Self, AnalysisError> {
        if n == 0 {
            return Err(AnalysisError::empty("comparisons"));
        }

        let mut values = vec![vec![1.0; n]; n];
        for &(i, j, value) in judgments {
            if i >= n || j >= n || i == j {
                return Err(AnalysisError::invalid_input(
                    "comparison",
                    format!("pair ({}, {}) is outside a {}x{} matrix", i, j, n, n),
                ));
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::InvalidComparisonValue { row: i, column: j, value });
            }
            values[i][j] = value;
            values[j][i] = 1.0 / value;
        }

        Ok(Self { values })
    }

    /// Fully indifferent matrix (every entry 1).
    pub fn indifferent(n: usize) -> Self {
        Self {
            values: vec![vec![1.0; n]; n],
        }
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row][column]
    }
}

/// Consistency diagnostic for a pairwise matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    pub consistency_ratio: f64,
    pub is_consistent: bool,
}

/// How criterion weights are derived for a run.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightingStrategy {
    /// Normalize each criterion's raw importance.
    Direct,
    /// Eigenvector approximation over a criteria comparison matrix whose
    /// row/column order matches the criterion order.
    Pairwise(PairwiseMatrix),
}

impl WeightingStrategy {
    /// Short label used in reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            WeightingStrategy::Direct => "direct",
            WeightingStrategy::Pairwise(_) => "pairwise",
        }
    }
}

/// Weights plus the consistency diagnostic when comparisons were used.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedWeights {
    pub weights: WeightVector,
    pub consistency: Option<ConsistencyReport>,
}

/// Criterion weight derivation functions.
pub struct WeightDeriver;

impl WeightDeriver {
    /// Derives weights with the selected strategy.
    pub fn derive(
        criteria: &[Criterion],
        strategy: &WeightingStrategy,
    ) -> Result<DerivedWeights, AnalysisError> {
        match strategy {
            WeightingStrategy::Direct => Ok(DerivedWeights {
                weights: Self::direct(criteria)?,
                consistency: None,
            }),
            WeightingStrategy::Pairwise(matrix) => Self::pairwise(criteria, matrix),
        }
    }

    /// Normalizes raw importances so they sum to 1.
    ///
    /// # Errors
    /// - Empty criteria: `EmptyInput`
    /// - Missing, negative or non-finite importance: `InvalidInput`
    /// - Importances summing to zero: `DegenerateWeights`
    ///
    /// A single zero importance is accepted and yields a zero weight.
    pub fn direct(criteria: &[Criterion]) -> Result<WeightVector, AnalysisError> {
        if criteria.is_empty() {
            return Err(AnalysisError::empty("criteria"));
        }

        let mut importances = Vec::with_capacity(criteria.len());
        for criterion in criteria {
            let importance = criterion.importance.ok_or_else(|| {
                AnalysisError::invalid_input(
                    criterion.name.clone(),
                    "importance is required for direct weighting",
                )
            })?;
            if !importance.is_finite() || importance < 0.0 {
                return Err(AnalysisError::invalid_input(
                    criterion.name.clone(),
                    format!("importance must be a non-negative number, got {}", importance),
                ));
            }
            importances.push(importance);
        }

        let total: f64 = importances.iter().sum();
        if total == 0.0 {
            return Err(AnalysisError::DegenerateWeights);
        }

        Ok(WeightVector::from_entries(
            criteria
                .iter()
                .zip(importances)
                .map(|(c, importance)| (c.name.clone(), importance / total))
                .collect(),
        ))
    }

    /// Derives weights from a criteria comparison matrix.
    pub fn pairwise(
        criteria: &[Criterion],
        matrix: &PairwiseMatrix,
    ) -> Result<DerivedWeights, AnalysisError> {
        if criteria.is_empty() {
            return Err(AnalysisError::empty("criteria"));
        }
        if matrix.size() != criteria.len() {
            return Err(AnalysisError::invalid_input(
                "matrix",
                format!(
                    "{}x{} matrix does not match {} criteria",
                    matrix.size(),
                    matrix.size(),
                    criteria.len()
                ),
            ));
        }

        let priorities = Self::priorities(matrix);
        let consistency = Self::consistency(matrix, &priorities);

        let weights = WeightVector::from_entries(
            criteria
                .iter()
                .zip(priorities)
                .map(|(c, w)| (c.name.clone(), w))
                .collect(),
        );

        Ok(DerivedWeights {
            weights,
            consistency: Some(consistency),
        })
    }

    /// Eigenvector approximation: row averages of the column-normalized matrix.
    pub fn priorities(matrix: &PairwiseMatrix) -> Vec<f64> {
        let n = matrix.size();
        let column_sums: Vec<f64> = (0..n)
            .map(|j| (0..n).map(|i| matrix.get(i, j)).sum())
            .collect();

        (0..n)
            .map(|i| {
                let row_total: f64 = (0..n).map(|j| matrix.get(i, j) / column_sums[j]).sum();
                row_total / n as f64
            })
            .collect()
    }

    /// Computes λmax, CI and CR for a matrix and its priorities.
    pub fn consistency(matrix: &PairwiseMatrix, priorities: &[f64]) -> ConsistencyReport {
        let n = matrix.size();

        let lambda_max = (0..n)
            .map(|i| {
                let weighted: f64 = (0..n).map(|j| matrix.get(i, j) * priorities[j]).sum();
                weighted / priorities[i]
            })
            .sum::<f64>()
            / n as f64;

        let consistency_index = if n > 1 {
            (lambda_max - n as f64) / (n as f64 - 1.0)
        } else {
            0.0
        };

        let random_index = random_index(n);
        let consistency_ratio = if random_index > 0.0 {
            consistency_index / random_index
        } else {
            0.0
        };

        ConsistencyReport {
            lambda_max,
            consistency_index,
            random_index,
            consistency_ratio,
            is_consistent: consistency_ratio <= CONSISTENCY_THRESHOLD,
        }
    }
}

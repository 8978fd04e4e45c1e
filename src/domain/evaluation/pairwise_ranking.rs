//! Pairwise Ranking - Full AHP synthesis over alternatives.
//!
//! Each criterion carries its own alternatives comparison matrix. Local
//! priorities come from the same column-normalize/row-average rule used for
//! criterion weights; the global score of an alternative is
//! `Σ weight(c) · priority_c(alternative)`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{
    AnalysisError, ConsistencyReport, DecisionProblem, PairwiseMatrix, RankingEngine,
    WeightDeriver, WeightVector,
};
use crate::domain::foundation::round_report;

/// Alternatives comparison matrices keyed by criterion name. Row/column order
/// of every matrix is the problem's alternative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlternativeComparisons {
    matrices: Vec<(String, PairwiseMatrix)>,
}

impl AlternativeComparisons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the matrix for a criterion, replacing any previous one.
    pub fn insert(&mut self, criterion: impl Into<String>, matrix: PairwiseMatrix) {
        let criterion = criterion.into();
        match self.matrices.iter_mut().find(|(name, _)| *name == criterion) {
            Some(entry) => entry.1 = matrix,
            None => self.matrices.push((criterion, matrix)),
        }
    }

    /// Adds a matrix for a criterion.
    pub fn with_matrix(mut self, criterion: impl Into<String>, matrix: PairwiseMatrix) -> Self {
        self.insert(criterion, matrix);
        self
    }

    pub fn get(&self, criterion: &str) -> Option<&PairwiseMatrix> {
        self.matrices
            .iter()
            .find(|(name, _)| name == criterion)
            .map(|(_, m)| m)
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// One alternative's synthesized AHP score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedAlternative {
    #[serde(rename = "alternativa")]
    pub alternative: String,
    /// Global priority, rounded to 4 decimals.
    pub score: f64,
}

/// AHP synthesis result: alternatives by descending global priority, plus a
/// consistency diagnostic per criterion matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisResult {
    pub ranking: Vec<SynthesizedAlternative>,
    #[serde(serialize_with = "serialize_consistency")]
    pub consistency: Vec<(String, ConsistencyReport)>,
}

impl SynthesisResult {
    /// The top-ranked alternative.
    pub fn winner(&self) -> Option<&SynthesizedAlternative> {
        self.ranking.first()
    }

    /// Criteria whose alternatives matrix exceeds the consistency threshold.
    pub fn inconsistent_criteria(&self) -> impl Iterator<Item = &str> {
        self.consistency
            .iter()
            .filter(|(_, report)| !report.is_consistent)
            .map(|(name, _)| name.as_str())
    }
}

fn serialize_consistency<S: Serializer>(
    reports: &[(String, ConsistencyReport)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(reports.len()))?;
    for (name, report) in reports {
        map.serialize_entry(name, report)?;
    }
    map.end()
}

/// AHP synthesis functions.
pub struct PairwiseRanking;

impl PairwiseRanking {
    /// Synthesizes global priorities from criterion weights and per-criterion
    /// alternatives matrices.
    ///
    /// # Errors
    /// - A criterion without a matrix, or a matrix whose size differs from
    ///   the alternative count: `InvalidInput`
    /// - Weights not covering every criterion: `InvalidInput`
    pub fn rank(
        problem: &DecisionProblem,
        weights: &WeightVector,
        comparisons: &AlternativeComparisons,
    ) -> Result<SynthesisResult, AnalysisError> {
        let criterion_weights = RankingEngine::weights_for(problem, weights)?;
        let n = problem.alternative_count();

        let mut totals = vec![0.0; n];
        let mut consistency = Vec::with_capacity(problem.criterion_count());

        for (criterion, weight) in problem.criteria().iter().zip(criterion_weights) {
            let matrix = comparisons.get(&criterion.name).ok_or_else(|| {
                AnalysisError::invalid_input(
                    criterion.name.clone(),
                    "no alternatives comparison matrix for criterion",
                )
            })?;
            if matrix.size() != n {
                return Err(AnalysisError::invalid_input(
                    criterion.name.clone(),
                    format!("{}x{} matrix does not match {} alternatives", matrix.size(), matrix.size(), n),
                ));
            }

            let local = WeightDeriver::priorities(matrix);
            for (total, priority) in totals.iter_mut().zip(&local) {
                *total += weight * priority;
            }
            consistency.push((criterion.name.clone(), WeightDeriver::consistency(matrix, &local)));
        }

        let mut ranking: Vec<SynthesizedAlternative> = problem
            .alternatives()
            .iter()
            .zip(totals)
            .map(|(alt, total)| SynthesizedAlternative {
                alternative: alt.name.clone(),
                score: round_report(total),
            })
            .collect();
        ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(SynthesisResult { ranking, consistency })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::Alternative;
    use crate::domain::foundation::Direction;

    fn problem() -> DecisionProblem {
        DecisionProblem::builder()
            .criterion("Costo", Direction::Minimize, 3.0)
            .criterion("Calidad", Direction::Maximize, 1.0)
            .alternative(Alternative::new("A"))
            .alternative(Alternative::new("B"))
            .build()
            .unwrap()
    }

    fn weights(problem: &DecisionProblem) -> WeightVector {
        WeightDeriver::direct(problem.criteria()).unwrap()
    }

    #[test]
    fn synthesis_weights_local_priorities() {
        let problem = problem();
        // Costo: A strongly preferred (priorities 0.75 / 0.25)
        // Calidad: B strongly preferred (priorities 0.25 / 0.75)
        let comparisons = AlternativeComparisons::new()
            .with_matrix("Costo", PairwiseMatrix::from_judgments(2, &[(0, 1, 3.0)]).unwrap())
            .with_matrix("Calidad", PairwiseMatrix::from_judgments(2, &[(0, 1, 1.0 / 3.0)]).unwrap());

        let result = PairwiseRanking::rank(&problem, &weights(&problem), &comparisons).unwrap();

        // A: 0.75·0.75 + 0.25·0.25 = 0.625
        assert_eq!(result.winner().unwrap().alternative, "A");
        assert_eq!(result.ranking[0].score, 0.625);
        assert_eq!(result.ranking[1].score, 0.375);
        assert_eq!(result.inconsistent_criteria().count(), 0);
    }

    #[test]
    fn indifferent_matrices_keep_input_order() {
        let problem = problem();
        let comparisons = AlternativeComparisons::new()
            .with_matrix("Costo", PairwiseMatrix::indifferent(2))
            .with_matrix("Calidad", PairwiseMatrix::indifferent(2));

        let result = PairwiseRanking::rank(&problem, &weights(&problem), &comparisons).unwrap();
        let names: Vec<_> = result.ranking.iter().map(|r| r.alternative.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(result.ranking[0].score, 0.5);
    }

    #[test]
    fn missing_matrix_is_rejected() {
        let problem = problem();
        let comparisons =
            AlternativeComparisons::new().with_matrix("Costo", PairwiseMatrix::indifferent(2));

        let err = PairwiseRanking::rank(&problem, &weights(&problem), &comparisons).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "Calidad"));
    }

    #[test]
    fn matrix_size_must_match_alternatives() {
        let problem = problem();
        let comparisons = AlternativeComparisons::new()
            .with_matrix("Costo", PairwiseMatrix::indifferent(3))
            .with_matrix("Calidad", PairwiseMatrix::indifferent(2));

        assert!(PairwiseRanking::rank(&problem, &weights(&problem), &comparisons).is_err());
    }

    #[test]
    fn inconsistent_criterion_is_reported() {
        let problem = DecisionProblem::builder()
            .criterion("Calidad", Direction::Maximize, 1.0)
            .alternative(Alternative::new("A"))
            .alternative(Alternative::new("B"))
            .alternative(Alternative::new("C"))
            .build()
            .unwrap();
        let cyclic =
            PairwiseMatrix::from_judgments(3, &[(0, 1, 9.0), (1, 2, 9.0), (0, 2, 1.0 / 9.0)]).unwrap();
        let comparisons = AlternativeComparisons::new().with_matrix("Calidad", cyclic);

        let result = PairwiseRanking::rank(&problem, &weights(&problem), &comparisons).unwrap();
        let flagged: Vec<_> = result.inconsistent_criteria().collect();
        assert_eq!(flagged, vec!["Calidad"]);
    }

    #[test]
    fn insert_replaces_existing_matrix() {
        let mut comparisons = AlternativeComparisons::new();
        comparisons.insert("Costo", PairwiseMatrix::indifferent(2));
        comparisons.insert("Costo", PairwiseMatrix::indifferent(3));
        assert_eq!(comparisons.get("Costo").unwrap().size(), 3);
    }
}

//! Ranking Engine - Weighted sum scoring of alternatives.

use serde::{Serialize, Serializer};

use super::{AnalysisError, DecisionProblem, GlobalRange, ValueNormalizer, WeightVector};
use crate::domain::foundation::round_report;

/// Normalized value per criterion, in criterion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Breakdown(Vec<(String, f64)>);

impl Breakdown {
    /// Gets the normalized value for a criterion.
    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.0.iter().find(|(name, _)| name == criterion).map(|(_, v)| *v)
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, v)| (name, v)))
    }
}

/// One alternative's weighted-sum result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAlternative {
    #[serde(rename = "alternativa")]
    pub alternative: String,
    /// Weighted sum, rounded to 4 decimals.
    pub score: f64,
    /// Normalized value per criterion, rounded to 4 decimals.
    #[serde(rename = "desglose")]
    pub breakdown: Breakdown,
    #[serde(rename = "pesos")]
    pub weights: WeightVector,
}

/// Alternatives sorted by descending score.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RankingResult {
    entries: Vec<RankedAlternative>,
}

impl RankingResult {
    /// Creates a ranking from entries, sorting them by descending score.
    /// Equal scores keep their given order.
    pub fn from_unsorted(mut entries: Vec<RankedAlternative>) -> Self {
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    /// The top-ranked alternative.
    pub fn winner(&self) -> Option<&RankedAlternative> {
        self.entries.first()
    }

    /// Looks up an alternative's entry.
    pub fn get(&self, alternative: &str) -> Option<&RankedAlternative> {
        self.entries.iter().find(|e| e.alternative == alternative)
    }

    /// Iterates entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedAlternative> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Weighted Sum Model ranking functions.
pub struct RankingEngine;

impl RankingEngine {
    /// Ranks alternatives by weighted sum of normalized representative values.
    ///
    /// # Algorithm
    /// 1. Representative value per (alternative, criterion): interval
    ///    midpoint, else scalar, else 0.0
    /// 2. Global range per criterion over the representative values
    /// 3. `score = Σ weight(c) · normalized(c)`
    /// 4. Stable sort, descending
    ///
    /// # Edge Cases
    /// - All alternatives equal on a criterion: that criterion contributes 0.5 · weight
    /// - Missing values: treated as 0.0
    pub fn rank(
        problem: &DecisionProblem,
        weights: &WeightVector,
    ) -> Result<RankingResult, AnalysisError> {
        let criteria = problem.criteria();
        let criterion_weights = Self::weights_for(problem, weights)?;
        let ranges = Self::representative_ranges(problem)?;

        let entries = problem
            .alternatives()
            .iter()
            .map(|alt| {
                let mut score = 0.0;
                let mut breakdown = Vec::with_capacity(criteria.len());

                for ((criterion, range), weight) in
                    criteria.iter().zip(&ranges).zip(&criterion_weights)
                {
                    let value = alt.value(&criterion.name).representative();
                    let normalized = ValueNormalizer::normalize(value, *range, criterion.direction);
                    score += weight * normalized;
                    breakdown.push((criterion.name.clone(), round_report(normalized)));
                }

                RankedAlternative {
                    alternative: alt.name.clone(),
                    score: round_report(score),
                    breakdown: Breakdown(breakdown),
                    weights: weights.clone(),
                }
            })
            .collect();

        Ok(RankingResult::from_unsorted(entries))
    }

    /// Global range of representative values for each criterion, in
    /// criterion order.
    pub fn representative_ranges(
        problem: &DecisionProblem,
    ) -> Result<Vec<GlobalRange>, AnalysisError> {
        problem
            .criteria()
            .iter()
            .map(|criterion| {
                GlobalRange::spanning(
                    problem
                        .alternatives()
                        .iter()
                        .map(|alt| alt.value(&criterion.name).representative()),
                )
                .ok_or_else(|| AnalysisError::empty("alternatives"))
            })
            .collect()
    }

    /// Looks up the weight of every criterion, failing if one is absent.
    pub(crate) fn weights_for(
        problem: &DecisionProblem,
        weights: &WeightVector,
    ) -> Result<Vec<f64>, AnalysisError> {
        problem
            .criteria()
            .iter()
            .map(|c| {
                weights.get(&c.name).ok_or_else(|| {
                    AnalysisError::invalid_input(c.name.clone(), "no weight derived for criterion")
                })
            })
            .collect()
    }
}

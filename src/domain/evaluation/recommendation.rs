//! Recommendation Aggregator - Combines ranking and simulation into advice.
//!
//! Pure functions over finished results:
//! - Agreement between the deterministic and the simulated winner
//! - Risk warnings (high variability, low win probability)
//! - Key criteria (the two heaviest weights)
//! - Summary rows in ranking order

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{RankingResult, SimulationResult, WeightVector};
use crate::domain::foundation::RiskLevel;

/// Win probability below which an alternative is flagged as an unsafe bet.
pub const LOW_WIN_PROBABILITY: f64 = 0.60;

/// Number of criteria named as the reasons for a recommendation.
pub const KEY_CRITERIA_COUNT: usize = 2;

/// Whether both models pick the same alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelAgreement {
    Consensus,
    Divergent,
}

/// A caution raised from simulation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskWarning {
    HighRisk { alternative: String },
    LowWinProbability { alternative: String, probability: f64 },
}

impl fmt::Display for RiskWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskWarning::HighRisk { alternative } => write!(
                f,
                "{} shows high variability; real outcomes may differ widely from the plan",
                alternative
            ),
            RiskWarning::LowWinProbability { alternative, probability } => write!(
                f,
                "{} won only {:.1}% of simulated scenarios; it is not a safe bet",
                alternative,
                probability * 100.0
            ),
        }
    }
}

/// A criterion that dominates the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCriterion {
    pub criterion: String,
    /// Weight as a fraction of the decision.
    pub weight: f64,
}

/// One alternative's condensed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "alternativa")]
    pub alternative: String,
    pub wsm_score: f64,
    pub expected_score: f64,
    #[serde(rename = "riesgo")]
    pub risk: RiskLevel,
    #[serde(rename = "prob_ganar")]
    pub win_probability: f64,
}

/// Final advice for a decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub decision_name: String,
    pub wsm_winner: String,
    pub monte_carlo_winner: String,
    pub agreement: ModelAgreement,
    pub warnings: Vec<RiskWarning>,
    pub key_criteria: Vec<KeyCriterion>,
    pub summary: Vec<SummaryRow>,
}

impl Recommendation {
    /// One-paragraph verdict naming the decision and both winners.
    pub fn headline(&self) -> String {
        match self.agreement {
            ModelAgreement::Consensus => format!(
                "With high confidence, the best option for '{}' is {}. It leads on the \
                 weighted criteria and stays ahead under uncertainty.",
                self.decision_name, self.wsm_winner
            ),
            ModelAgreement::Divergent => format!(
                "The models disagree for '{}'. The weighted criteria favour {}, while the \
                 risk simulation favours {} for steadier results. Pick {} to maximise the \
                 expected technical benefit, or {} to avoid surprises.",
                self.decision_name,
                self.wsm_winner,
                self.monte_carlo_winner,
                self.wsm_winner,
                self.monte_carlo_winner
            ),
        }
    }
}

/// Recommendation functions.
pub struct RecommendationAggregator;

impl RecommendationAggregator {
    /// Builds the full recommendation. Returns None when the ranking is empty.
    pub fn recommend(
        decision_name: &str,
        ranking: &RankingResult,
        simulation: &SimulationResult,
        weights: &WeightVector,
    ) -> Option<Recommendation> {
        let wsm_winner = ranking.winner()?.alternative.clone();
        let monte_carlo_winner = simulation.winner.clone();

        let agreement = if wsm_winner == monte_carlo_winner {
            ModelAgreement::Consensus
        } else {
            ModelAgreement::Divergent
        };

        Some(Recommendation {
            decision_name: decision_name.to_string(),
            wsm_winner,
            monte_carlo_winner,
            agreement,
            warnings: Self::warnings(simulation),
            key_criteria: Self::key_criteria(weights),
            summary: Self::summary(ranking, simulation),
        })
    }

    /// Warnings for every alternative with high risk or a win probability
    /// below [`LOW_WIN_PROBABILITY`], in simulation order.
    pub fn warnings(simulation: &SimulationResult) -> Vec<RiskWarning> {
        let mut warnings = Vec::new();
        for (name, sim) in simulation.iter() {
            if sim.risk == RiskLevel::High {
                warnings.push(RiskWarning::HighRisk {
                    alternative: name.to_string(),
                });
            }
            if sim.win_probability < LOW_WIN_PROBABILITY {
                warnings.push(RiskWarning::LowWinProbability {
                    alternative: name.to_string(),
                    probability: sim.win_probability,
                });
            }
        }
        warnings
    }

    /// The heaviest criteria, descending. Equal weights keep criterion order.
    pub fn key_criteria(weights: &WeightVector) -> Vec<KeyCriterion> {
        let mut sorted: Vec<(&str, f64)> = weights.iter().collect();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted
            .into_iter()
            .take(KEY_CRITERIA_COUNT)
            .map(|(name, weight)| KeyCriterion {
                criterion: name.to_string(),
                weight,
            })
            .collect()
    }

    /// One row per ranked alternative, in ranking order.
    pub fn summary(ranking: &RankingResult, simulation: &SimulationResult) -> Vec<SummaryRow> {
        ranking
            .iter()
            .filter_map(|entry| {
                let sim = simulation.get(&entry.alternative)?;
                Some(SummaryRow {
                    alternative: entry.alternative.clone(),
                    wsm_score: entry.score,
                    expected_score: sim.statistics.mean,
                    risk: sim.risk,
                    win_probability: sim.win_probability,
                })
            })
            .collect()
    }
}

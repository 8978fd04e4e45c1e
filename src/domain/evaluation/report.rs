//! Analysis Report - Complete output of one analysis run.

use serde::Serialize;

use super::{
    ConsistencyReport, RankingResult, Recommendation, SimulationResult, SynthesisResult,
    WeightVector,
};
use crate::domain::foundation::{AnalysisId, Timestamp};

/// How the run's criterion weights were obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightingSummary {
    /// `direct` or `pairwise`.
    pub method: String,
    #[serde(rename = "pesos")]
    pub weights: WeightVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<ConsistencyReport>,
}

/// An (alternative, criterion) pair evaluated as 0.0 for lack of data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingValue {
    #[serde(rename = "alternativa")]
    pub alternative: String,
    #[serde(rename = "criterio")]
    pub criterion: String,
}

/// Everything produced by one run, ready for a presentation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub decision_name: String,
    pub computed_at: Timestamp,
    pub iterations: usize,
    /// Generator seed; rerunning with it reproduces the simulation.
    pub seed: u64,
    pub weighting: WeightingSummary,
    pub ranking: RankingResult,
    pub simulation: SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<SynthesisResult>,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_values: Vec<MissingValue>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::evaluation::{
        Alternative, DecisionProblem, MonteCarloSimulator, RankingEngine,
        RecommendationAggregator, WeightDeriver,
    };
    use crate::domain::foundation::Direction;

    /// Report for the two-supplier cost/quality decision with point values.
    pub(crate) fn sample_report() -> AnalysisReport {
        let problem = DecisionProblem::builder()
            .name("Proveedor")
            .criterion("Costo", Direction::Minimize, 9.0)
            .criterion("Calidad", Direction::Maximize, 7.0)
            .alternative(Alternative::new("A").with_scalar("Costo", 100.0).with_scalar("Calidad", 5.0))
            .alternative(Alternative::new("B").with_scalar("Costo", 200.0).with_scalar("Calidad", 8.0))
            .build()
            .unwrap();
        let weights = WeightDeriver::direct(problem.criteria()).unwrap();
        let ranking = RankingEngine::rank(&problem, &weights).unwrap();
        let simulation = MonteCarloSimulator::new(100)
            .unwrap()
            .simulate_seeded(&problem, &weights, 1)
            .unwrap();
        let recommendation =
            RecommendationAggregator::recommend(problem.name(), &ranking, &simulation, &weights)
                .unwrap();

        AnalysisReport {
            analysis_id: AnalysisId::new(),
            decision_name: problem.name().to_string(),
            computed_at: Timestamp::now(),
            iterations: 100,
            seed: 1,
            weighting: WeightingSummary {
                method: "direct".to_string(),
                weights,
                consistency: None,
            },
            ranking,
            simulation,
            synthesis: None,
            recommendation,
            missing_values: Vec::new(),
        }
    }
}

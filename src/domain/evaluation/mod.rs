//! Evaluation Module - Pure quantitative core of the decision analyzer.
//!
//! Stateless functions over a validated [`DecisionProblem`]. Nothing here
//! performs I/O; randomness is injected by the caller.
//!
//! # Components
//!
//! - `DecisionProblem` - Criteria, alternatives and their (possibly uncertain) values
//! - `WeightDeriver` - Direct normalization or AHP eigenvector approximation with consistency
//! - `ValueNormalizer` - Direction-aware min-max normalization
//! - `RankingEngine` - Deterministic weighted-sum ranking on midpoints
//! - `PairwiseRanking` - AHP synthesis over alternatives comparison matrices
//! - `MonteCarloSimulator` - Uniform sampling of value intervals
//! - `ScoreStatistics` - Distribution summaries and win probabilities
//! - `RecommendationAggregator` - Agreement, warnings, key criteria and summary rows
//! - `AnalysisReport` - Complete output of a run
//!
//! # Determinism
//!
//! Everything except the simulator is a pure function of its inputs. The
//! simulator is reproducible given the same seed.

mod errors;
mod monte_carlo;
mod pairwise_ranking;
mod problem;
mod ranking_engine;
mod recommendation;
mod report;
mod statistics;
mod value_normalizer;
mod weight_deriver;

pub use errors::AnalysisError;
pub use monte_carlo::{
    AlternativeSimulation, MonteCarloSimulator, SimulationResult, DEFAULT_ITERATIONS,
};
pub use pairwise_ranking::{
    AlternativeComparisons, PairwiseRanking, SynthesisResult, SynthesizedAlternative,
};
pub use problem::{
    Alternative, Criterion, CriterionValue, DecisionProblem, DecisionProblemBuilder, Interval,
};
pub use ranking_engine::{Breakdown, RankedAlternative, RankingEngine, RankingResult};
pub use recommendation::{
    KeyCriterion, ModelAgreement, Recommendation, RecommendationAggregator, RiskWarning,
    SummaryRow, KEY_CRITERIA_COUNT, LOW_WIN_PROBABILITY,
};
pub use report::{AnalysisReport, MissingValue, WeightingSummary};
#[cfg(test)]
pub(crate) use report::fixtures;
pub use statistics::{percentile, win_probabilities, ScoreStatistics};
pub use value_normalizer::{GlobalRange, ValueNormalizer, NEUTRAL_SCORE};
pub use weight_deriver::{
    random_index, ConsistencyReport, DerivedWeights, PairwiseMatrix, WeightDeriver,
    WeightVector, WeightingStrategy, CONSISTENCY_THRESHOLD, RANDOM_INDEX, RECIPROCITY_TOLERANCE,
};

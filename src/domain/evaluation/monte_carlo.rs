//! Monte Carlo Simulator - Probabilistic ranking under value uncertainty.
//!
//! Every alternative's declared interval is sampled uniformly, normalized
//! against the range of all interval endpoints, and aggregated with the same
//! weighted sum as the deterministic ranking. Iteration `k` of every
//! alternative is treated as one shared scenario when counting wins.
//!
//! The endpoint range differs from the midpoint range the deterministic
//! ranking uses, so the two can disagree even for zero-width inputs that are
//! mixed with wide ones.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::statistics::win_probabilities;
use super::{
    AnalysisError, DecisionProblem, GlobalRange, RankingEngine, ScoreStatistics, ValueNormalizer,
    WeightVector,
};
use crate::domain::foundation::{round_report, RiskLevel};

/// Iterations used when none are configured.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Simulated outcome for one alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeSimulation {
    /// One score per iteration, in iteration order.
    #[serde(skip)]
    pub samples: Vec<f64>,
    #[serde(flatten)]
    pub statistics: ScoreStatistics,
    #[serde(rename = "riesgo")]
    pub risk: RiskLevel,
    /// Fraction of iterations this alternative scored highest, rounded to 4 decimals.
    #[serde(rename = "prob_ganar")]
    pub win_probability: f64,
}

/// Outcome of a full simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Alternative with the highest mean score.
    #[serde(rename = "ganador")]
    pub winner: String,
    #[serde(rename = "resultados", serialize_with = "serialize_in_order")]
    results: Vec<(String, AlternativeSimulation)>,
    #[serde(rename = "iteraciones")]
    pub iterations: usize,
}

impl SimulationResult {
    /// Looks up one alternative's outcome.
    pub fn get(&self, alternative: &str) -> Option<&AlternativeSimulation> {
        self.results
            .iter()
            .find(|(name, _)| name == alternative)
            .map(|(_, sim)| sim)
    }

    /// Iterates outcomes in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AlternativeSimulation)> {
        self.results.iter().map(|(name, sim)| (name.as_str(), sim))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn serialize_in_order<S: Serializer>(
    results: &[(String, AlternativeSimulation)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(results.len()))?;
    for (name, sim) in results {
        map.serialize_entry(name, sim)?;
    }
    map.end()
}

/// Monte Carlo simulation over declared value intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloSimulator {
    iterations: usize,
}

impl Default for MonteCarloSimulator {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl MonteCarloSimulator {
    /// Creates a simulator. Zero iterations is rejected.
    pub fn new(iterations: usize) -> Result<Self, AnalysisError> {
        if iterations == 0 {
            return Err(AnalysisError::invalid_input(
                "Iteraciones",
                "iteration count must be at least 1",
            ));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs the simulation with a generator seeded from `seed`.
    pub fn simulate_seeded(
        &self,
        problem: &DecisionProblem,
        weights: &WeightVector,
        seed: u64,
    ) -> Result<SimulationResult, AnalysisError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.simulate(problem, weights, &mut rng)
    }

    /// Runs the simulation and reduces every distribution.
    ///
    /// # Algorithm
    /// 1. Sample scores (see [`Self::sample_scores`])
    /// 2. Per alternative: mean, population stddev, p5, p95, min, max, risk
    /// 3. Win probability from per-iteration maxima
    /// 4. Winner: highest mean, first alternative on ties
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        problem: &DecisionProblem,
        weights: &WeightVector,
        rng: &mut R,
    ) -> Result<SimulationResult, AnalysisError> {
        let samples = self.sample_scores(problem, weights, rng)?;
        let probabilities = win_probabilities(&samples)?;

        let mut results = Vec::with_capacity(samples.len());
        for ((alt, scores), probability) in problem
            .alternatives()
            .iter()
            .zip(samples)
            .zip(probabilities)
        {
            let statistics = ScoreStatistics::from_samples(&scores)
                .ok_or_else(|| AnalysisError::empty("iterations"))?;
            results.push((
                alt.name.clone(),
                AlternativeSimulation {
                    samples: scores,
                    statistics,
                    risk: statistics.risk(),
                    win_probability: round_report(probability),
                },
            ));
        }

        let mut best: Option<&(String, AlternativeSimulation)> = None;
        for entry in &results {
            if best.map_or(true, |b| entry.1.statistics.mean > b.1.statistics.mean) {
                best = Some(entry);
            }
        }
        let winner = best
            .map(|(name, _)| name.clone())
            .ok_or_else(|| AnalysisError::empty("alternatives"))?;

        Ok(SimulationResult {
            winner,
            results,
            iterations: self.iterations,
        })
    }

    /// Draws `iterations` scores per alternative, in alternative order.
    ///
    /// Each (alternative, criterion) interval is sampled independently and
    /// uniformly; zero-width intervals contribute their single value without
    /// consuming randomness.
    pub fn sample_scores<R: Rng + ?Sized>(
        &self,
        problem: &DecisionProblem,
        weights: &WeightVector,
        rng: &mut R,
    ) -> Result<Vec<Vec<f64>>, AnalysisError> {
        let criterion_weights = RankingEngine::weights_for(problem, weights)?;
        let ranges = Self::endpoint_ranges(problem)?;

        let samples = problem
            .alternatives()
            .iter()
            .map(|alt| {
                let mut scores = vec![0.0; self.iterations];

                for ((criterion, range), weight) in problem
                    .criteria()
                    .iter()
                    .zip(&ranges)
                    .zip(&criterion_weights)
                {
                    let interval = alt.value(&criterion.name).interval();

                    if interval.is_degenerate() {
                        let normalized =
                            ValueNormalizer::normalize(interval.min(), *range, criterion.direction);
                        for score in scores.iter_mut() {
                            *score += weight * normalized;
                        }
                    } else {
                        let uniform = Uniform::new_inclusive(interval.min(), interval.max());
                        for score in scores.iter_mut() {
                            let draw = uniform.sample(rng);
                            *score +=
                                weight * ValueNormalizer::normalize(draw, *range, criterion.direction);
                        }
                    }
                }

                scores
            })
            .collect();

        Ok(samples)
    }

    /// Global range per criterion over every declared interval endpoint,
    /// in criterion order.
    pub fn endpoint_ranges(problem: &DecisionProblem) -> Result<Vec<GlobalRange>, AnalysisError> {
        problem
            .criteria()
            .iter()
            .map(|criterion| {
                GlobalRange::spanning(problem.alternatives().iter().flat_map(|alt| {
                    let interval = alt.value(&criterion.name).interval();
                    [interval.min(), interval.max()]
                }))
                .ok_or_else(|| AnalysisError::empty("alternatives"))
            })
            .collect()
    }
}

//! RunAnalysisHandler - Command handler for a complete decision analysis.
//!
//! Loads records through the source port, maps them into typed entities,
//! runs the blocking evaluation core on a worker thread and publishes the
//! report through the sink port.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::record_mapping::{map_records, MappedDecision};
use crate::config::AppConfig;
use crate::domain::evaluation::{
    AnalysisError, AnalysisReport, MissingValue, MonteCarloSimulator, PairwiseRanking,
    RankingEngine, RecommendationAggregator, WeightDeriver, WeightingSummary,
};
use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, Timestamp};
use crate::ports::{DecisionSource, ReportSink, SinkError, SourceError};

/// Command to run an analysis.
///
/// Overrides take precedence over the records' configuration, which takes
/// precedence over the handler settings.
#[derive(Debug, Clone, Default)]
pub struct RunAnalysisCommand {
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct RunAnalysisResult {
    /// The published report.
    pub report: AnalysisReport,
}

/// Handler defaults, usually taken from [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub default_iterations: usize,
    pub seed: Option<u64>,
    pub reject_inconsistent: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnalysisSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_iterations: config.simulation.iterations,
            seed: config.simulation.seed,
            reject_inconsistent: config.weighting.reject_inconsistent,
        }
    }
}

/// Error type for running an analysis.
#[derive(Debug, thiserror::Error)]
pub enum RunAnalysisError {
    #[error("Failed to load decision records: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Criteria comparisons are inconsistent (CR = {consistency_ratio:.4})")]
    InconsistentComparisons { consistency_ratio: f64 },

    #[error("Failed to publish report: {0}")]
    Sink(#[from] SinkError),

    #[error("Evaluation worker failed: {0}")]
    Worker(String),
}

impl From<RunAnalysisError> for DomainError {
    fn from(err: RunAnalysisError) -> Self {
        let message = err.to_string();
        match err {
            RunAnalysisError::Analysis(inner) => inner.into(),
            RunAnalysisError::Source(_) => DomainError::new(ErrorCode::SourceUnavailable, message),
            RunAnalysisError::InconsistentComparisons { consistency_ratio } => {
                DomainError::new(ErrorCode::InconsistentComparisons, message)
                    .with_detail("consistency_ratio", format!("{:.4}", consistency_ratio))
            }
            RunAnalysisError::Sink(_) => DomainError::new(ErrorCode::SinkFailed, message),
            RunAnalysisError::Worker(_) => DomainError::new(ErrorCode::InternalError, message),
        }
    }
}

/// Handler for running analyses.
pub struct RunAnalysisHandler {
    source: Arc<dyn DecisionSource>,
    sink: Arc<dyn ReportSink>,
    settings: AnalysisSettings,
}

impl RunAnalysisHandler {
    pub fn new(
        source: Arc<dyn DecisionSource>,
        sink: Arc<dyn ReportSink>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            source,
            sink,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: RunAnalysisCommand,
    ) -> Result<RunAnalysisResult, RunAnalysisError> {
        // 1. Load raw records
        let records = self.source.load().await?;
        debug!(
            criteria = records.criterios.len(),
            alternatives = records.alternativas.len(),
            comparisons = records.comparaciones.len(),
            "Loaded decision records"
        );

        // 2. Map into typed entities
        let mapped = map_records(&records)?;

        // 3. Resolve run parameters
        let iterations = cmd
            .iterations
            .or(mapped.iterations)
            .unwrap_or(self.settings.default_iterations);
        let seed = cmd
            .seed
            .or(self.settings.seed)
            .unwrap_or_else(rand::random::<u64>);
        let reject_inconsistent = self.settings.reject_inconsistent;

        // 4. Evaluate on a blocking worker
        let report = tokio::task::spawn_blocking(move || {
            evaluate(mapped, iterations, seed, reject_inconsistent)
        })
        .await
        .map_err(|e| RunAnalysisError::Worker(e.to_string()))??;

        // 5. Publish
        self.sink.publish(&report).await?;

        info!(
            analysis_id = %report.analysis_id,
            decision = %report.decision_name,
            wsm_winner = %report.recommendation.wsm_winner,
            monte_carlo_winner = %report.recommendation.monte_carlo_winner,
            iterations = report.iterations,
            seed = report.seed,
            "Analysis completed"
        );

        Ok(RunAnalysisResult { report })
    }
}

/// Runs the evaluation core end to end. Blocking.
fn evaluate(
    mapped: MappedDecision,
    iterations: usize,
    seed: u64,
    reject_inconsistent: bool,
) -> Result<AnalysisReport, RunAnalysisError> {
    let MappedDecision {
        problem,
        strategy,
        alternative_comparisons,
        ..
    } = mapped;

    let missing_values: Vec<MissingValue> = problem
        .missing_values()
        .map(|(alternative, criterion)| {
            warn!(
                alternative = %alternative,
                criterion = %criterion,
                "Missing criterion value evaluated as 0.0"
            );
            MissingValue {
                alternative: alternative.to_string(),
                criterion: criterion.to_string(),
            }
        })
        .collect();

    let derived = WeightDeriver::derive(problem.criteria(), &strategy)?;
    debug!(method = strategy.label(), "Derived criterion weights");

    if let Some(report) = derived.consistency.filter(|r| !r.is_consistent) {
        if reject_inconsistent {
            return Err(RunAnalysisError::InconsistentComparisons {
                consistency_ratio: report.consistency_ratio,
            });
        }
        warn!(
            consistency_ratio = report.consistency_ratio,
            "Criteria comparisons exceed the consistency threshold; proceeding"
        );
    }

    let ranking = RankingEngine::rank(&problem, &derived.weights)?;
    debug!(alternatives = ranking.len(), "Computed weighted-sum ranking");

    let synthesis = alternative_comparisons
        .map(|comparisons| PairwiseRanking::rank(&problem, &derived.weights, &comparisons))
        .transpose()?;
    if let Some(result) = &synthesis {
        for criterion in result.inconsistent_criteria() {
            warn!(
                criterion = %criterion,
                "Alternatives comparisons exceed the consistency threshold"
            );
        }
    }

    let simulation =
        MonteCarloSimulator::new(iterations)?.simulate_seeded(&problem, &derived.weights, seed)?;
    debug!(
        iterations = iterations,
        seed = seed,
        winner = %simulation.winner,
        "Completed Monte Carlo simulation"
    );

    let recommendation = RecommendationAggregator::recommend(
        problem.name(),
        &ranking,
        &simulation,
        &derived.weights,
    )
    .ok_or_else(|| AnalysisError::empty("alternatives"))?;
    if recommendation.wsm_winner != recommendation.monte_carlo_winner {
        warn!(
            wsm_winner = %recommendation.wsm_winner,
            monte_carlo_winner = %recommendation.monte_carlo_winner,
            "Weighted-sum and simulation winners diverge"
        );
    }

    Ok(AnalysisReport {
        analysis_id: AnalysisId::new(),
        decision_name: problem.name().to_string(),
        computed_at: Timestamp::now(),
        iterations,
        seed,
        weighting: WeightingSummary {
            method: strategy.label().to_string(),
            weights: derived.weights,
            consistency: derived.consistency,
        },
        ranking,
        simulation,
        synthesis,
        recommendation,
        missing_values,
    })
}

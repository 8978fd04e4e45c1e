//! Statistics - Summary of simulated score distributions and win counts.

use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::domain::foundation::{round_report, RiskLevel};

/// Summary statistics of one score distribution, rounded to 4 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    #[serde(rename = "media")]
    pub mean: f64,
    /// Population standard deviation.
    #[serde(rename = "desviacion")]
    pub stddev: f64,
    #[serde(rename = "percentil_5")]
    pub p5: f64,
    #[serde(rename = "percentil_95")]
    pub p95: f64,
    #[serde(rename = "minimo")]
    pub min: f64,
    #[serde(rename = "maximo")]
    pub max: f64,
}

impl ScoreStatistics {
    /// Reduces samples to summary statistics. Returns None for no samples.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            mean: round_report(mean),
            stddev: round_report(variance.sqrt()),
            p5: round_report(percentile(&sorted, 5.0)),
            p95: round_report(percentile(&sorted, 95.0)),
            min: round_report(sorted[0]),
            max: round_report(sorted[sorted.len() - 1]),
        })
    }

    /// Risk label for this distribution's (rounded) standard deviation.
    pub fn risk(&self) -> RiskLevel {
        RiskLevel::classify(self.stddev)
    }
}

/// Percentile of sorted data with linear interpolation between closest ranks.
///
/// `p` is in [0, 100]. The rank is `p / 100 · (n - 1)`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let fraction = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

/// Fraction of iterations each alternative has the highest score.
///
/// `samples[a][k]` is alternative `a`'s score in iteration `k`; every
/// alternative must share the same iteration indexing. A tie at the maximum
/// goes to the alternative that comes first.
pub fn win_probabilities(samples: &[Vec<f64>]) -> Result<Vec<f64>, AnalysisError> {
    let Some(first) = samples.first() else {
        return Err(AnalysisError::empty("alternatives"));
    };
    let iterations = first.len();
    if iterations == 0 {
        return Err(AnalysisError::empty("iterations"));
    }
    if samples.iter().any(|s| s.len() != iterations) {
        return Err(AnalysisError::invalid_input(
            "samples",
            "all alternatives must be sampled for the same iterations",
        ));
    }

    let mut wins = vec![0usize; samples.len()];
    for k in 0..iterations {
        let mut best = 0;
        for (a, scores) in samples.iter().enumerate().skip(1) {
            if scores[k] > samples[best][k] {
                best = a;
            }
        }
        wins[best] += 1;
    }

    Ok(wins
        .into_iter()
        .map(|count| count as f64 / iterations as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn statistics_of_constant_samples() {
        let stats = ScoreStatistics::from_samples(&[0.5625; 1000]).unwrap();
        assert_eq!(stats.mean, 0.5625);
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(stats.p5, 0.5625);
        assert_eq!(stats.p95, 0.5625);
        assert_eq!(stats.min, 0.5625);
        assert_eq!(stats.max, 0.5625);
        assert_eq!(stats.risk(), RiskLevel::Low);
    }

    #[test]
    fn statistics_use_population_stddev() {
        let stats = ScoreStatistics::from_samples(&[0.2, 0.4, 0.6, 0.8]).unwrap();
        assert_eq!(stats.mean, 0.5);
        // sqrt(((0.3² + 0.1²) · 2) / 4) = sqrt(0.05)
        assert_eq!(stats.stddev, 0.2236);
        assert_eq!(stats.min, 0.2);
        assert_eq!(stats.max, 0.8);
        assert_eq!(stats.risk(), RiskLevel::High);
    }

    #[test]
    fn empty_samples_have_no_statistics() {
        assert!(ScoreStatistics::from_samples(&[]).is_none());
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted: Vec<f64> = (1..=11).map(f64::from).collect();
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 6.0);
        assert_eq!(percentile(&sorted, 100.0), 11.0);
        assert!((percentile(&sorted, 5.0) - 1.5).abs() < 1e-12);
        assert!((percentile(&sorted, 95.0) - 10.5).abs() < 1e-12);
    }

    #[test]
    fn percentile_of_single_value() {
        assert_eq!(percentile(&[0.7], 95.0), 0.7);
    }

    #[test]
    fn win_probabilities_count_per_iteration_maxima() {
        let samples = vec![vec![0.9, 0.1, 0.5, 0.2], vec![0.1, 0.9, 0.4, 0.8]];
        assert_eq!(win_probabilities(&samples).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn ties_go_to_first_alternative() {
        let samples = vec![vec![0.5, 0.5], vec![0.5, 0.6], vec![0.5, 0.6]];
        assert_eq!(win_probabilities(&samples).unwrap(), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn win_probabilities_reject_misaligned_samples() {
        let samples = vec![vec![0.1, 0.2], vec![0.3]];
        assert!(matches!(
            win_probabilities(&samples),
            Err(AnalysisError::InvalidInput { .. })
        ));
        assert!(win_probabilities(&[]).is_err());
    }

    proptest! {
        #[test]
        fn win_probabilities_sum_to_one(
            samples in (1usize..6, 1usize..200).prop_flat_map(|(alts, iters)| {
                prop::collection::vec(prop::collection::vec(0.0f64..1.0, iters), alts)
            })
        ) {
            let probs = win_probabilities(&samples).unwrap();
            prop_assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn percentiles_are_ordered(mut data in prop::collection::vec(0.0f64..1.0, 1..300)) {
            data.sort_by(|a, b| a.total_cmp(b));
            let p5 = percentile(&data, 5.0);
            let p95 = percentile(&data, 95.0);
            prop_assert!(data[0] <= p5 && p5 <= p95 && p95 <= data[data.len() - 1]);
        }
    }
}

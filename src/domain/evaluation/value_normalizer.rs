//! Value Normalizer - Direction-aware mapping of raw values onto [0, 1].

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Direction;

/// Score returned when every alternative has the same value for a criterion.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Observed minimum and maximum of a criterion across alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalRange {
    pub min: f64,
    pub max: f64,
}

impl GlobalRange {
    /// Creates a range from explicit bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Spans every value in the iterator. Returns None when it is empty.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |range, v| match range {
            None => Some(Self::new(v, v)),
            Some(r) => Some(Self::new(r.min.min(v), r.max.max(v))),
        })
    }

    /// Returns true if the range carries no discriminating information.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Value normalization functions.
pub struct ValueNormalizer;

impl ValueNormalizer {
    /// Maps a value onto [0, 1] relative to `range`.
    ///
    /// # Algorithm
    /// - Degenerate range: 0.5
    /// - Minimize: `(max - value) / (max - min)`
    /// - Maximize: `(value - min) / (max - min)`
    ///
    /// Values outside `range` are not clamped; callers must pass a range that
    /// bounds every value they normalize.
    pub fn normalize(value: f64, range: GlobalRange, direction: Direction) -> f64 {
        if range.is_degenerate() {
            return NEUTRAL_SCORE;
        }

        let span = range.max - range.min;
        match direction {
            Direction::Minimize => (range.max - value) / span,
            Direction::Maximize => (value - range.min) / span,
        }
    }
}

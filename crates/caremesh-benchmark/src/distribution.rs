// crates/caremesh-benchmark/src/distribution.rs

use serde::Serialize;

use caremesh_core::ResponseTrend;

/// A distribution over the three response-trend categories.
///
/// Fractions lie in [0, 1] and sum to 1 — or to 0 for the empty
/// distribution, which is a legitimate state (a participant with no
/// samples yet), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendDistribution {
    pub improving: f64,
    pub plateau: f64,
    pub worse: f64,
}

impl TrendDistribution {
    /// The all-zero distribution.
    pub const ZERO: TrendDistribution = TrendDistribution {
        improving: 0.0,
        plateau: 0.0,
        worse: 0.0,
    };

    /// Exact fractions over the given samples; `ZERO` when empty.
    pub fn from_samples(samples: &[ResponseTrend]) -> Self {
        if samples.is_empty() {
            return Self::ZERO;
        }
        let total = samples.len() as f64;
        let count = |wanted: ResponseTrend| {
            samples.iter().filter(|&&t| t == wanted).count() as f64 / total
        };
        Self {
            improving: count(ResponseTrend::Improving),
            plateau: count(ResponseTrend::Plateau),
            worse: count(ResponseTrend::Worse),
        }
    }

    /// Mean of per-participant distributions; `ZERO` when empty.
    ///
    /// Participant-level averaging: every distribution weighs the same,
    /// however many samples produced it.
    pub fn mean(distributions: &[TrendDistribution]) -> Self {
        if distributions.is_empty() {
            return Self::ZERO;
        }
        let n = distributions.len() as f64;
        Self {
            improving: distributions.iter().map(|d| d.improving).sum::<f64>() / n,
            plateau: distributions.iter().map(|d| d.plateau).sum::<f64>() / n,
            worse: distributions.iter().map(|d| d.worse).sum::<f64>() / n,
        }
    }

    /// Round each fraction to two decimal places for presentation.
    pub fn rounded(&self) -> Self {
        let round2 = |x: f64| (x * 100.0).round() / 100.0;
        Self {
            improving: round2(self.improving),
            plateau: round2(self.plateau),
            worse: round2(self.worse),
        }
    }
}

//! Response time statistics
//!
//! Quartiles use linear interpolation between closest ranks.

use serde::{Deserialize, Serialize};

use crate::models::PostmanRun;

/// Lower quartile, median and upper quartile in milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Calculate quartiles from sorted samples
    pub fn from_sorted(sorted: &[f64]) -> Self {
        Self {
            q1: percentile(sorted, 25.0),
            median: percentile(sorted, 50.0),
            q3: percentile(sorted, 75.0),
        }
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Calculate percentile value from sorted array
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let idx = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    let fraction = idx - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Summary of one set of response times
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResponseTimeStats {
    /// Samples the statistics are computed over
    pub count: usize,
    /// Samples dropped before analysis (below the minimum response time)
    pub discarded: usize,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub quartiles: Quartiles,
}

impl ResponseTimeStats {
    /// Calculate statistics from response times in milliseconds
    pub fn from_samples(samples: &[u64], discarded: usize) -> Self {
        if samples.is_empty() {
            return Self {
                discarded,
                ..Self::default()
            };
        }

        let mut sorted: Vec<f64> = samples.iter().map(|&t| t as f64).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let sum: f64 = sorted.iter().sum();

        Self {
            count: sorted.len(),
            discarded,
            min: samples.iter().copied().min().unwrap_or_default(),
            max: samples.iter().copied().max().unwrap_or_default(),
            mean: sum / sorted.len() as f64,
            quartiles: Quartiles::from_sorted(&sorted),
        }
    }

    /// Format as summary string
    pub fn format_summary(&self) -> String {
        format!(
            "n={} min={}ms q1={:.1}ms median={:.1}ms q3={:.1}ms max={}ms mean={:.2}ms",
            self.count,
            self.min,
            self.quartiles.q1,
            self.quartiles.median,
            self.quartiles.q3,
            self.max,
            self.mean
        )
    }
}

/// All response times of a run, in request then iteration order
pub fn collect_times(run: &PostmanRun) -> Vec<u64> {
    run.results
        .iter()
        .flat_map(|result| result.times.iter().copied())
        .collect()
}

/// Split off times below `min_ms`; returns the kept times and how many
/// were dropped
pub fn filter_fast(times: &[u64], min_ms: u64) -> (Vec<u64>, usize) {
    let kept: Vec<u64> = times.iter().copied().filter(|&t| t >= min_ms).collect();
    let discarded = times.len() - kept.len();
    (kept, discarded)
}

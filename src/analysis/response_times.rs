//! Response time distributions for single runs and weekend/workday
//! comparisons

use serde::Serialize;
use tracing::debug;

use super::histogram::{smooth, Histogram};
use super::stats::{collect_times, filter_fast, ResponseTimeStats};
use crate::config::HistogramConfig;
use crate::error::TestkitError;
use crate::models::PostmanRun;

/// Smoothed percentage curve over histogram bins
#[derive(Clone, Debug, Serialize)]
pub struct Curve {
    pub label: String,
    /// `(bin start in ms, percentage of samples)`
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    fn new(label: impl Into<String>, bin_starts: &[u64], values: &[f64]) -> Self {
        Self {
            label: label.into(),
            points: bin_starts
                .iter()
                .zip(values)
                .map(|(&x, &y)| (x as f64, y))
                .collect(),
        }
    }

    /// Highest percentage on the curve
    pub fn peak(&self) -> f64 {
        self.points.iter().map(|&(_, y)| y).fold(0.0, f64::max)
    }
}

/// Distribution of a single run after dropping the fastest responses
#[derive(Clone, Debug, Serialize)]
pub struct SingleRunAnalysis {
    pub stats: ResponseTimeStats,
    pub curve: Curve,
    pub bin_width: u64,
    /// Right edge of the last bin
    pub x_max: u64,
}

impl SingleRunAnalysis {
    pub fn analyze(run: &PostmanRun, config: &HistogramConfig) -> Result<Self, TestkitError> {
        let times = collect_times(run);
        let (kept, discarded) = filter_fast(&times, config.min_response_ms);
        debug!(
            "{} response times, {} below {}ms discarded",
            times.len(),
            discarded,
            config.min_response_ms
        );

        let Some(&max) = kept.iter().max() else {
            return Err(TestkitError::NoResponseTimes(format!(
                "all {} times are below {}ms",
                times.len(),
                config.min_response_ms
            )));
        };

        let histogram = Histogram::build(&kept, config.bin_width_ms, max);
        debug!(
            "{} bins of {}ms, fullest holds {} responses",
            histogram.counts().len(),
            histogram.bin_width(),
            histogram.counts().iter().max().copied().unwrap_or(0)
        );
        let smoothed = smooth(&histogram.percentages(), config.smoothing_window);

        Ok(Self {
            stats: ResponseTimeStats::from_samples(&kept, discarded),
            curve: Curve::new("All Data", histogram.bin_starts(), &smoothed),
            bin_width: histogram.bin_width(),
            x_max: histogram.upper_edge(),
        })
    }
}

/// Weekend and workday distributions on shared bins
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonAnalysis {
    pub weekend: ResponseTimeStats,
    pub normal_day: ResponseTimeStats,
    /// Statistics over both runs together
    pub combined: ResponseTimeStats,
    pub weekend_curve: Curve,
    pub normal_day_curve: Curve,
    /// Mean of the two smoothed curves
    pub average_curve: Curve,
    pub bin_width: u64,
    pub x_max: u64,
}

impl ComparisonAnalysis {
    /// Compare two runs. Times are not filtered here; every recorded
    /// response counts.
    pub fn analyze(
        weekend: &PostmanRun,
        normal_day: &PostmanRun,
        config: &HistogramConfig,
    ) -> Result<Self, TestkitError> {
        let weekend_times = collect_times(weekend);
        let normal_day_times = collect_times(normal_day);

        let (Some(&weekend_max), Some(&normal_max)) =
            (weekend_times.iter().max(), normal_day_times.iter().max())
        else {
            return Err(TestkitError::NoResponseTimes(
                "either weekend or normal day has no response times".to_string(),
            ));
        };
        let max = weekend_max.max(normal_max);

        let weekend_hist = Histogram::build(&weekend_times, config.bin_width_ms, max);
        let normal_hist = Histogram::build(&normal_day_times, config.bin_width_ms, max);

        let weekend_smoothed = smooth(&weekend_hist.percentages(), config.smoothing_window);
        let normal_smoothed = smooth(&normal_hist.percentages(), config.smoothing_window);
        let average: Vec<f64> = weekend_smoothed
            .iter()
            .zip(&normal_smoothed)
            .map(|(w, n)| (w + n) / 2.0)
            .collect();

        let combined: Vec<u64> = weekend_times
            .iter()
            .chain(&normal_day_times)
            .copied()
            .collect();

        let bins = weekend_hist.bin_starts();
        Ok(Self {
            weekend: ResponseTimeStats::from_samples(&weekend_times, 0),
            normal_day: ResponseTimeStats::from_samples(&normal_day_times, 0),
            combined: ResponseTimeStats::from_samples(&combined, 0),
            weekend_curve: Curve::new("Weekend", bins, &weekend_smoothed),
            normal_day_curve: Curve::new("Normal Day", bins, &normal_smoothed),
            average_curve: Curve::new("Average of Weekend and Normal Day", bins, &average),
            bin_width: weekend_hist.bin_width(),
            x_max: weekend_hist.upper_edge(),
        })
    }
}

//! Fixed-width histograms of response times

use serde::Serialize;

/// Counts of samples per fixed-width bin starting at zero.
///
/// Bins are `[start, start + width)` except the last, which also takes
/// samples equal to its upper edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Histogram {
    bin_width: u64,
    /// Bin edges, one more than there are bins
    edges: Vec<u64>,
    counts: Vec<u64>,
}

impl Histogram {
    /// Bin `samples` into edges `0, w, 2w, ...` up to the first edge that
    /// reaches `max`. There is always at least one bin.
    pub fn build(samples: &[u64], bin_width: u64, max: u64) -> Self {
        let bin_width = bin_width.max(1);
        let bins = max.div_ceil(bin_width).max(1) as usize;
        let edges: Vec<u64> = (0..=bins as u64).map(|k| k * bin_width).collect();
        let upper = edges[bins];

        let mut counts = vec![0u64; bins];
        for &sample in samples {
            let idx = if sample == upper {
                bins - 1
            } else {
                (sample / bin_width) as usize
            };
            if let Some(count) = counts.get_mut(idx) {
                *count += 1;
            }
        }

        Self {
            bin_width,
            edges,
            counts,
        }
    }

    pub fn bin_width(&self) -> u64 {
        self.bin_width
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Left edge of every bin
    pub fn bin_starts(&self) -> &[u64] {
        &self.edges[..self.edges.len() - 1]
    }

    /// Right edge of the last bin
    pub fn upper_edge(&self) -> u64 {
        self.edges[self.edges.len() - 1]
    }

    /// Samples that fell into a bin
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of samples per bin, in percent
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| c as f64 / total as f64 * 100.0)
            .collect()
    }
}

/// Centred moving average with a box window of `window` values.
///
/// Values outside the input count as zero, so the output has the same
/// length as the input and edges are pulled down.
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let offset = ((window - 1) / 2) as isize;
    let n = values.len() as isize;

    (0..n)
        .map(|i| {
            let sum: f64 = (0..window as isize)
                .map(|j| i + offset - j)
                .filter(|&k| k >= 0 && k < n)
                .map(|k| values[k as usize])
                .sum();
            sum / window as f64
        })
        .collect()
}

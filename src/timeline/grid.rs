use std::ops::Range;

use crate::error::{GazeError, Result};

/// Default multiple of the nominal interval above which a delta counts as a gap.
pub const DEFAULT_GAP_TOLERANCE: f64 = 2.5;

/// Standard deviation of deltas (seconds) above which sampling is irregular.
const IRREGULAR_STD_SECS: f64 = 1e-5;

/// Sample timeline shared by every classifier and converter.
///
/// Timestamps are seconds, non-decreasing. The nominal interval is the median
/// of the strictly positive deltas; tied samples (zero delta) never count as a
/// gap and never define the nominal rate.
#[derive(Debug, Clone)]
pub struct TemporalGrid {
    timestamps: Vec<f64>,
    nominal_interval: Option<f64>,
    gap_tolerance: f64,
    /// Start index of every valid run, ascending. Always begins with 0.
    run_starts: Vec<usize>,
}

impl TemporalGrid {
    /// Build a grid with the default gap tolerance.
    pub fn build(timestamps: Vec<f64>) -> Result<Self> {
        Self::with_gap_tolerance(timestamps, DEFAULT_GAP_TOLERANCE)
    }

    pub fn with_gap_tolerance(timestamps: Vec<f64>, gap_tolerance: f64) -> Result<Self> {
        if timestamps.is_empty() {
            return Err(GazeError::invalid("timestamps are empty"));
        }
        if !gap_tolerance.is_finite() || gap_tolerance < 1.0 {
            return Err(GazeError::invalid(format!(
                "gap tolerance must be a finite multiple >= 1, got {}",
                gap_tolerance
            )));
        }
        if let Some(i) = timestamps.iter().position(|t| !t.is_finite()) {
            return Err(GazeError::invalid(format!(
                "timestamp {} is not finite ({})",
                i, timestamps[i]
            )));
        }
        if let Some(i) = (1..timestamps.len()).find(|&i| timestamps[i] < timestamps[i - 1]) {
            return Err(GazeError::invalid(format!(
                "timestamps decrease at sample {} ({} < {})",
                i,
                timestamps[i],
                timestamps[i - 1]
            )));
        }

        let positive: Vec<f64> = timestamps
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| *d > 0.0)
            .collect();
        let nominal_interval = median(positive);

        let mut run_starts = vec![0];
        if let Some(interval) = nominal_interval {
            let limit = gap_tolerance * interval;
            run_starts.extend(
                (1..timestamps.len()).filter(|&i| timestamps[i] - timestamps[i - 1] > limit),
            );
        }

        Ok(Self {
            timestamps,
            nominal_interval,
            gap_tolerance,
            run_starts,
        })
    }

    /// Build a regular grid `start + i / sampling_rate` for `n` samples.
    pub fn from_sampling_rate(n: usize, sampling_rate: f64, start: f64) -> Result<Self> {
        if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
            return Err(GazeError::invalid(format!(
                "sampling rate must be positive, got {}",
                sampling_rate
            )));
        }
        let timestamps = (0..n).map(|i| start + i as f64 / sampling_rate).collect();
        Self::build(timestamps)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false: a grid holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn time(&self, index: usize) -> Option<f64> {
        self.timestamps.get(index).copied()
    }

    /// Median inter-sample delta in seconds. `None` with fewer than two distinct times.
    pub fn nominal_interval(&self) -> Option<f64> {
        self.nominal_interval
    }

    pub fn sampling_rate(&self) -> Option<f64> {
        self.nominal_interval.map(|dt| 1.0 / dt)
    }

    pub fn gap_tolerance(&self) -> f64 {
        self.gap_tolerance
    }

    /// `(last sample before, first sample after)` for every detected gap.
    ///
    /// Calling again restarts the sequence.
    pub fn gaps(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.run_starts.iter().skip(1).map(|&start| (start - 1, start))
    }

    pub fn gap_count(&self) -> usize {
        self.run_starts.len() - 1
    }

    /// True when a gap separates `index - 1` from `index`.
    pub fn is_gap_before(&self, index: usize) -> bool {
        index > 0 && self.run_starts.binary_search(&index).is_ok()
    }

    /// Maximal gap-free index ranges, in order.
    pub fn valid_runs(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let n = self.len();
        self.run_starts.iter().enumerate().map(move |(k, &start)| {
            let end = self.run_starts.get(k + 1).copied().unwrap_or(n);
            start..end
        })
    }

    /// The valid run holding `index`, or `None` past the end of the grid.
    pub fn run_containing(&self, index: usize) -> Option<Range<usize>> {
        if index >= self.len() {
            return None;
        }
        let k = match self.run_starts.binary_search(&index) {
            Ok(k) => k,
            Err(k) => k - 1,
        };
        let end = self.run_starts.get(k + 1).copied().unwrap_or(self.len());
        Some(self.run_starts[k]..end)
    }

    /// Number of whole samples spanning `secs` at the nominal rate (at least 1).
    pub fn duration_to_samples(&self, secs: f64) -> Option<usize> {
        let interval = self.nominal_interval?;
        // Absorb representation error so 0.1 s at 100 Hz is 10 samples, not 9.
        let samples = (secs / interval + 1e-6).floor();
        Some((samples.max(1.0)) as usize)
    }

    /// True when the deltas vary by more than 10 µs (population std).
    pub fn is_irregular(&self) -> bool {
        if self.len() < 3 {
            return false;
        }
        let deltas: Vec<f64> = self.timestamps.windows(2).map(|w| w[1] - w[0]).collect();
        let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
        let var = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / deltas.len() as f64;
        var.sqrt() > IRREGULAR_STD_SECS
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

//! 2D gaze-angle series and the per-sample features the classifiers consume.
//!
//! Features are derived on demand from the stored samples. Anything that
//! would need information across a timing gap, or a zero elapsed time, is
//! reported as `None` instead of being extrapolated.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{GazeError, Result};
use crate::timeline::TemporalGrid;

/// How the angular distance between two consecutive samples is measured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean norm of (Δx, Δy) in degrees.
    Planar,
    /// Great-circle angle, reading x as azimuth and y as elevation.
    Spherical,
}

impl Default for DistanceMetric {
    fn default() -> Self {
        DistanceMetric::Planar
    }
}

/// Axis-aligned extent of a set of gaze samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Extent {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Extent {
    pub(crate) fn at(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    pub(crate) fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Extent if `(x, y)` were added, without mutating.
    pub(crate) fn with(mut self, x: f64, y: f64) -> Self {
        self.include(x, y);
        self
    }

    /// `(max_x - min_x) + (max_y - min_y)`
    pub(crate) fn dispersion(&self) -> f64 {
        (self.max_x - self.min_x) + (self.max_y - self.min_y)
    }
}

/// Gaze direction in degrees, aligned sample-for-sample with its grid.
#[derive(Debug, Clone)]
pub struct AngularSignal {
    grid: TemporalGrid,
    x: Vec<f64>,
    y: Vec<f64>,
    metric: DistanceMetric,
}

impl AngularSignal {
    pub fn new(grid: TemporalGrid, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() || x.len() != grid.len() {
            return Err(GazeError::invalid(format!(
                "length mismatch: {} timestamps, {} x samples, {} y samples",
                grid.len(),
                x.len(),
                y.len()
            )));
        }
        for (axis, values) in [("x", &x), ("y", &y)] {
            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(GazeError::invalid(format!(
                    "gaze {} sample {} is not finite ({})",
                    axis, i, values[i]
                )));
            }
        }

        Ok(Self {
            grid,
            x,
            y,
            metric: DistanceMetric::default(),
        })
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn grid(&self) -> &TemporalGrid {
        &self.grid
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Angular distance in degrees between samples `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        let (ax, ay) = self.point(a)?;
        let (bx, by) = self.point(b)?;
        Some(match self.metric {
            DistanceMetric::Planar => (bx - ax).hypot(by - ay),
            DistanceMetric::Spherical => great_circle_deg(ax, ay, bx, by),
        })
    }

    /// Angular speed (deg/s) from sample `index - 1` to `index`.
    ///
    /// `None` at index 0, at the first sample after a gap, and where the two
    /// samples share a timestamp.
    pub fn velocity_at(&self, index: usize) -> Option<f64> {
        if index == 0 || index >= self.len() || self.grid.is_gap_before(index) {
            return None;
        }
        let dt = self.grid.time(index)? - self.grid.time(index - 1)?;
        if dt <= 0.0 {
            return None;
        }
        Some(self.distance(index - 1, index)? / dt)
    }

    /// One speed per sample, mapped onto the later sample of each pair.
    pub fn velocities(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.len()).map(move |i| self.velocity_at(i))
    }

    /// Rate of change of speed (deg/s²) at each sample.
    pub fn accelerations(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.len()).map(move |i| {
            if i == 0 {
                return None;
            }
            let dv = self.velocity_at(i)? - self.velocity_at(i - 1)?;
            let dt = self.grid.time(i)? - self.grid.time(i - 1)?;
            Some(dv / dt)
        })
    }

    /// Dispersion over `window`, clipped to the valid run holding its first sample.
    ///
    /// `None` for an empty window or one that starts past the last sample.
    pub fn dispersion(&self, window: Range<usize>) -> Option<f64> {
        if window.start >= window.end {
            return None;
        }
        let run = self.grid.run_containing(window.start)?;
        self.extent(window.start..window.end.min(run.end))
            .map(|extent| extent.dispersion())
    }

    /// Dispersion over `center ± radius` samples, clipped to `center`'s valid run.
    pub fn dispersion_around(&self, center: usize, radius: usize) -> Option<f64> {
        let run = self.grid.run_containing(center)?;
        let start = center.saturating_sub(radius).max(run.start);
        let end = center.saturating_add(radius).saturating_add(1).min(run.end);
        self.extent(start..end).map(|extent| extent.dispersion())
    }

    /// Dispersion over the `secs` following `start`, converted at the nominal rate.
    pub fn dispersion_for_duration(&self, start: usize, secs: f64) -> Option<f64> {
        let samples = self.grid.duration_to_samples(secs)?;
        self.dispersion(start..start.saturating_add(samples))
    }

    pub(crate) fn extent(&self, range: Range<usize>) -> Option<Extent> {
        let mut samples = self.x[range.clone()].iter().zip(&self.y[range]);
        let (&x0, &y0) = samples.next()?;
        Some(samples.fold(Extent::at(x0, y0), |mut extent, (&x, &y)| {
            extent.include(x, y);
            extent
        }))
    }
}

fn great_circle_deg(az_a: f64, el_a: f64, az_b: f64, el_b: f64) -> f64 {
    let unit = |az: f64, el: f64| {
        let (az, el) = (az.to_radians(), el.to_radians());
        [el.cos() * az.sin(), el.sin(), el.cos() * az.cos()]
    };
    let a = unit(az_a, el_a);
    let b = unit(az_b, el_b);
    let cross = [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ];
    let sin = (cross[0].powi(2) + cross[1].powi(2) + cross[2].powi(2)).sqrt();
    let cos = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    // atan2 stays accurate for the tiny angles between consecutive samples.
    sin.atan2(cos).to_degrees()
}

use serde::{Deserialize, Serialize};

use crate::error::{GazeError, Result};
use crate::signal::DistanceMetric;
use crate::timeline::DEFAULT_GAP_TOLERANCE;

/// Per-call options shared by the classifiers and the pipeline.
///
/// Thresholds have no defaults: a classifier that needs one fails with
/// `MissingParameter` when it is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassificationConfig {
    /// I-VT cutoff in deg/s. Speeds equal to it are fixations.
    pub velocity_threshold: Option<f64>,

    /// I-DT cutoff in degrees. Dispersions equal to it are fixations.
    pub dispersion_threshold: Option<f64>,

    /// Minimum I-DT fixation window in seconds.
    pub min_duration: Option<f64>,

    /// Multiple of the nominal interval above which a delta is a gap.
    pub gap_tolerance: f64,

    /// Metric used for sample-to-sample angular distance.
    pub distance: DistanceMetric,

    /// Events shorter than this (seconds) are relabelled `Undefined` by the
    /// normalizer. Off when `None`.
    pub min_event_duration: Option<f64>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: None,
            dispersion_threshold: None,
            min_duration: None,
            gap_tolerance: DEFAULT_GAP_TOLERANCE,
            distance: DistanceMetric::default(),
            min_event_duration: None,
        }
    }
}

impl ClassificationConfig {
    pub fn velocity(threshold: f64) -> Self {
        Self {
            velocity_threshold: Some(threshold),
            ..Self::default()
        }
    }

    pub fn dispersion(threshold: f64, min_duration: f64) -> Self {
        Self {
            dispersion_threshold: Some(threshold),
            min_duration: Some(min_duration),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GazeError::invalid(format!("invalid classification config: {}", e)))
    }

    pub(crate) fn require_velocity_threshold(&self) -> Result<f64> {
        let threshold = self
            .velocity_threshold
            .ok_or(GazeError::MissingParameter("velocity_threshold"))?;
        non_negative("velocity_threshold", threshold)
    }

    pub(crate) fn require_dispersion_threshold(&self) -> Result<f64> {
        let threshold = self
            .dispersion_threshold
            .ok_or(GazeError::MissingParameter("dispersion_threshold"))?;
        non_negative("dispersion_threshold", threshold)
    }

    pub(crate) fn require_min_duration(&self) -> Result<f64> {
        let secs = self
            .min_duration
            .ok_or(GazeError::MissingParameter("min_duration"))?;
        non_negative("min_duration", secs)
    }
}

fn non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GazeError::invalid(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )))
    }
}

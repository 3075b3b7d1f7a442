//! Raw arrays in, both label representations out.
//!
//! Steps:
//! 1. Build the grid (gap detection) and the angular signal
//! 2. Run the classifier for per-sample labels
//! 3. Convert to events, breaking at gaps
//! 4. Normalize events (merge, minimum-duration policy)
//! 5. Re-expand so the per-sample labels agree with the normalized events

use serde::Serialize;

use crate::classification::{ClassificationConfig, Classifier};
use crate::error::Result;
use crate::models::{ContinuousClassification, DiscreteClassification};
use crate::segmentation::{normalize, to_continuous, to_discrete, NormalizerConfig};
use crate::signal::AngularSignal;
use crate::timeline::TemporalGrid;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

/// Output of one classifier run over one recording.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Classification {
    pub continuous: ContinuousClassification,
    pub events: DiscreteClassification,
}

/// Classify one recording given as `times` (seconds) and gaze angles (degrees).
pub fn classify_recording(
    times: Vec<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
    classifier: &Classifier,
    config: &ClassificationConfig,
) -> Result<Classification> {
    let grid = TemporalGrid::with_gap_tolerance(times, config.gap_tolerance)?;
    if grid.gap_count() > 0 {
        log_debug!(
            "Detected {} gaps at tolerance {}x nominal interval",
            grid.gap_count(),
            grid.gap_tolerance()
        );
    }

    let signal = AngularSignal::new(grid, x, y)?.with_metric(config.distance);
    classify_signal(&signal, classifier, config)
}

/// Classify an already validated signal.
pub fn classify_signal(
    signal: &AngularSignal,
    classifier: &Classifier,
    config: &ClassificationConfig,
) -> Result<Classification> {
    let grid = signal.grid();
    let labels = classifier.classify(signal, config)?;
    let discrete = to_discrete(&labels, grid)?;

    let policy = config
        .min_event_duration
        .map(|secs| NormalizerConfig::from_duration(secs, grid))
        .unwrap_or_default();
    let events = normalize(&discrete, &policy);
    let continuous = to_continuous(events.events(), grid.len())?;

    log_info!(
        "{} classified {} samples into {} events",
        classifier.name(),
        continuous.len(),
        events.len()
    );

    Ok(Classification { continuous, events })
}

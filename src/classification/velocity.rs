//! I-VT: velocity-threshold identification (Salvucci & Goldberg, 2000).
//!
//! Each sample is labelled from its own speed only:
//! - `Saccade` when the speed is strictly above the threshold
//! - `Fixation` when it is at or below the threshold
//! - `Undefined` when no speed exists (first sample, first sample after a
//!   gap, tied timestamps)

use crate::classification::config::ClassificationConfig;
use crate::error::Result;
use crate::models::{ContinuousClassification, Label};
use crate::signal::AngularSignal;
use crate::{log_debug, log_warn};

const ENABLE_LOGS: bool = true;

/// Label every sample of `signal` by its angular speed.
pub fn classify_velocity(
    signal: &AngularSignal,
    config: &ClassificationConfig,
) -> Result<ContinuousClassification> {
    let threshold = config.require_velocity_threshold()?;

    if signal.grid().is_irregular() {
        log_warn!(
            "Irregular sampling detected; I-VT uses per-sample elapsed time ({} samples)",
            signal.len()
        );
    }

    let labels: Vec<Label> = signal
        .velocities()
        .map(|velocity| label_for(velocity, threshold))
        .collect();

    log_debug!(
        "I-VT labelled {} samples at {} deg/s",
        labels.len(),
        threshold
    );

    Ok(ContinuousClassification::new(labels))
}

/// Ties go to `Fixation`: the saccade side of the boundary is open.
fn label_for(velocity: Option<f64>, threshold: f64) -> Label {
    match velocity {
        None => Label::Undefined,
        Some(v) if v > threshold => Label::Saccade,
        Some(_) => Label::Fixation,
    }
}

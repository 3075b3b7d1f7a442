//! I-DT: dispersion-threshold identification (Salvucci & Goldberg, 2000).
//!
//! A window of `min_duration` samples is laid at the current position. If its
//! dispersion is at or below the threshold it grows one sample at a time until
//! the next sample would push it over, and the whole window becomes a
//! `Fixation`. Otherwise the first sample is a `Saccade` and the window slides
//! by one.
//!
//! Each valid run is scanned on its own. Samples left at the end of a run that
//! are too few to fill a window stay `Undefined` (degenerate window).

use std::ops::Range;

use crate::classification::config::ClassificationConfig;
use crate::error::Result;
use crate::models::{ContinuousClassification, Label};
use crate::signal::AngularSignal;
use crate::{log_debug, log_warn};

const ENABLE_LOGS: bool = true;

/// Label every sample of `signal` by windowed dispersion.
pub fn classify_dispersion(
    signal: &AngularSignal,
    config: &ClassificationConfig,
) -> Result<ContinuousClassification> {
    let threshold = config.require_dispersion_threshold()?;
    let min_duration = config.require_min_duration()?;
    let grid = signal.grid();
    let mut labels = vec![Label::Undefined; signal.len()];

    let Some(window) = grid.duration_to_samples(min_duration) else {
        log_debug!(
            "I-DT window undefined without a nominal interval; {} samples left Undefined",
            signal.len()
        );
        return Ok(ContinuousClassification::new(labels));
    };

    if grid.is_irregular() {
        log_warn!(
            "Irregular sampling detected; I-DT window of {}s taken as {} samples",
            min_duration,
            window
        );
    }

    for run in grid.valid_runs() {
        classify_run(signal, run, window, threshold, &mut labels);
    }

    Ok(ContinuousClassification::new(labels))
}

fn classify_run(
    signal: &AngularSignal,
    run: Range<usize>,
    window: usize,
    threshold: f64,
    labels: &mut [Label],
) {
    let mut start = run.start;

    while let Some(end) = start.checked_add(window).filter(|&end| end <= run.end) {
        let Some(mut extent) = signal.extent(start..end) else {
            break;
        };

        if extent.dispersion() > threshold {
            labels[start] = Label::Saccade;
            start += 1;
            continue;
        }

        let mut stop = end;
        while stop < run.end {
            let Some((x, y)) = signal.point(stop) else {
                break;
            };
            let grown = extent.with(x, y);
            if grown.dispersion() > threshold {
                break;
            }
            extent = grown;
            stop += 1;
        }

        labels[start..stop].fill(Label::Fixation);
        start = stop;
    }

    if start < run.end {
        log_debug!(
            "Degenerate I-DT window: samples {}..{} shorter than {} samples, left Undefined",
            start,
            run.end,
            window
        );
    }
}

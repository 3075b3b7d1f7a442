use serde::{Deserialize, Serialize};

use crate::models::{DiscreteClassification, Event, Label};
use crate::timeline::TemporalGrid;
use crate::log_debug;

const ENABLE_LOGS: bool = true;

/// Minimum-duration policy for the event normalizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Events with fewer samples become `Undefined`. 1 disables relabelling.
    pub min_event_samples: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_event_samples: 1,
        }
    }
}

impl NormalizerConfig {
    /// Policy from a duration in seconds, converted at the grid's nominal rate.
    pub fn from_duration(secs: f64, grid: &TemporalGrid) -> Self {
        Self {
            min_event_samples: grid.duration_to_samples(secs).unwrap_or(1),
        }
    }
}

/// Fuse consecutive events that share a label and touch with no gap between.
///
/// Two events are fused only when the second starts on the sample right after
/// the first ends and that sample is not a recorded gap break.
pub fn merge_adjacent(discrete: &DiscreteClassification) -> DiscreteClassification {
    let mut merged: Vec<Event> = Vec::with_capacity(discrete.len());

    for event in discrete.events() {
        match merged.last_mut() {
            Some(previous)
                if previous.label == event.label
                    && previous.offset.checked_add(1) == Some(event.onset)
                    && !discrete.is_gap_break(event.onset) =>
            {
                previous.offset = event.offset;
            }
            _ => merged.push(*event),
        }
    }

    DiscreteClassification::from_parts(merged, discrete.gap_breaks().to_vec())
}

/// Merge, relabel events shorter than the policy as `Undefined`, then merge
/// again so relabelled neighbours fuse.
///
/// Short events are relabelled, never dropped, so coverage is preserved.
pub fn normalize(discrete: &DiscreteClassification, config: &NormalizerConfig) -> DiscreteClassification {
    let merged = merge_adjacent(discrete);
    if config.min_event_samples <= 1 {
        return merged;
    }

    let mut relabelled = 0;
    let events: Vec<Event> = merged
        .events()
        .iter()
        .map(|event| {
            if event.sample_count() < config.min_event_samples && event.label != Label::Undefined {
                relabelled += 1;
                Event::new(event.onset, event.offset, Label::Undefined)
            } else {
                *event
            }
        })
        .collect();

    if relabelled > 0 {
        log_debug!(
            "Relabelled {} events shorter than {} samples as Undefined",
            relabelled,
            config.min_event_samples
        );
    }

    merge_adjacent(&DiscreteClassification::from_parts(
        events,
        merged.gap_breaks().to_vec(),
    ))
}

use crate::error::{CoverageFault, GazeError, Result};
use crate::models::{ContinuousClassification, DiscreteClassification, Event, Label};
use crate::timeline::TemporalGrid;
use crate::{log_debug, log_warn};

const ENABLE_LOGS: bool = true;

/// Group consecutive samples with the same label into events.
///
/// A new event starts at index 0, wherever the label changes, and at the first
/// sample after every gap in `grid` even if the label is unchanged.
pub fn to_discrete(
    continuous: &ContinuousClassification,
    grid: &TemporalGrid,
) -> Result<DiscreteClassification> {
    if continuous.len() != grid.len() {
        return Err(GazeError::invalid(format!(
            "classification has {} labels but the grid has {} samples",
            continuous.len(),
            grid.len()
        )));
    }

    let mut events = Vec::new();
    let mut current: Option<Event> = None;

    for (index, &label) in continuous.labels().iter().enumerate() {
        match &mut current {
            Some(event) if event.label == label && !grid.is_gap_before(index) => {
                // Same label, no gap: extend current event
                event.offset = index;
            }
            _ => {
                if let Some(event) = current.take() {
                    events.push(event);
                }
                current = Some(Event::new(index, index, label));
            }
        }
    }

    if let Some(event) = current {
        events.push(event);
    }

    let gap_breaks: Vec<usize> = grid.gaps().map(|(_, after)| after).collect();
    log_debug!(
        "Converted {} samples into {} events ({} gap breaks)",
        continuous.len(),
        events.len(),
        gap_breaks.len()
    );

    Ok(DiscreteClassification::from_parts(events, gap_breaks))
}

/// Expand events into one label per sample for `n` samples.
///
/// Out-of-order input is reordered by onset, not rejected. The reordered
/// events must cover `0..n` exactly once: a missing sample, a doubly covered
/// sample, an inverted event or an event past `n - 1` fails with
/// `GazeError::Coverage` instead of being patched.
pub fn to_continuous(events: &[Event], n: usize) -> Result<ContinuousClassification> {
    let mut ordered = events.to_vec();
    let key = |event: &Event| (event.onset, event.offset);
    if ordered.windows(2).any(|pair| key(&pair[0]) > key(&pair[1])) {
        log_debug!("Reordering {} events by onset", ordered.len());
        ordered.sort_by_key(key);
    }

    let mut labels = Vec::with_capacity(n);
    for event in &ordered {
        let next = labels.len();
        let fault = if event.onset > event.offset {
            Some(CoverageFault::Inverted {
                onset: event.onset,
                offset: event.offset,
            })
        } else if event.onset > next {
            Some(CoverageFault::Missing(next))
        } else if event.onset < next {
            Some(CoverageFault::Overlap(event.onset))
        } else if event.offset >= n {
            Some(CoverageFault::OutOfRange {
                offset: event.offset,
            })
        } else {
            None
        };

        if let Some(fault) = fault {
            return Err(coverage_error(n, fault));
        }
        labels.extend(std::iter::repeat(event.label).take(event.sample_count()));
    }

    if labels.len() < n {
        return Err(coverage_error(n, CoverageFault::Missing(labels.len())));
    }

    Ok(ContinuousClassification::new(labels))
}

/// Map `(onset_time, label)` pairs onto the grid.
///
/// Each sample takes the label of the latest onset at or before its
/// timestamp; samples before the first onset are `Undefined`.
pub fn onsets_to_continuous(
    onsets: &[(f64, Label)],
    grid: &TemporalGrid,
) -> Result<ContinuousClassification> {
    if let Some((time, _)) = onsets.iter().find(|(time, _)| !time.is_finite()) {
        return Err(GazeError::invalid(format!(
            "event onset time {} is not finite",
            time
        )));
    }

    let mut ordered = onsets.to_vec();
    ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut next = 0;
    let labels = grid
        .timestamps()
        .iter()
        .map(|&t| {
            while next < ordered.len() && ordered[next].0 <= t {
                next += 1;
            }
            if next == 0 {
                Label::Undefined
            } else {
                ordered[next - 1].1
            }
        })
        .collect();

    Ok(ContinuousClassification::new(labels))
}

fn coverage_error(n: usize, fault: CoverageFault) -> GazeError {
    log_warn!("Rejected event list over {} samples: {}", n, fault);
    GazeError::Coverage { n, fault }
}

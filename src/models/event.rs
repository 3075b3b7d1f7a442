use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Label;
use crate::timeline::TemporalGrid;

/// A contiguous, inclusive sample range `[onset, offset]` carrying one label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub onset: usize,
    pub offset: usize,
    pub label: Label,
}

impl Event {
    pub fn new(onset: usize, offset: usize, label: Label) -> Self {
        Self {
            onset,
            offset,
            label,
        }
    }

    /// Number of samples covered.
    pub fn sample_count(&self) -> usize {
        self.offset.saturating_sub(self.onset) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.onset <= index && index <= self.offset
    }

    pub fn onset_time(&self, grid: &TemporalGrid) -> Option<f64> {
        grid.time(self.onset)
    }

    pub fn offset_time(&self, grid: &TemporalGrid) -> Option<f64> {
        grid.time(self.offset)
    }

    /// Duration in seconds.
    pub fn duration(&self, grid: &TemporalGrid) -> Option<f64> {
        // Includes the sampling interval after the last sample,
        // e.g. samples at T0, T1 cover [T0, T2), not just [T0, T1).
        let span = self.offset_time(grid)? - self.onset_time(grid)?;
        Some(span + grid.nominal_interval().unwrap_or(0.0))
    }
}

/// One label per sample, aligned to a `TemporalGrid`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContinuousClassification {
    labels: Vec<Label>,
}

impl ContinuousClassification {
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// `n` samples, all `Unclassified`.
    pub fn unclassified(n: usize) -> Self {
        Self {
            labels: vec![Label::Unclassified; n],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn get(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }
}

impl From<Vec<Label>> for ContinuousClassification {
    fn from(labels: Vec<Label>) -> Self {
        Self::new(labels)
    }
}

/// Ordered event list plus the sample indices where a timing gap forced an
/// event break.
///
/// `gap_breaks` holds the first index of every valid run after the first;
/// the normalizer never fuses two events across one of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscreteClassification {
    events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    gap_breaks: Vec<usize>,
}

impl DiscreteClassification {
    /// Wrap events with no gap information (e.g. from an external tool).
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            gap_breaks: Vec::new(),
        }
    }

    /// Wrap events and record the gap boundaries of `grid`.
    pub fn with_grid(events: Vec<Event>, grid: &TemporalGrid) -> Self {
        Self {
            events,
            gap_breaks: grid.gaps().map(|(_, after)| after).collect(),
        }
    }

    pub(crate) fn from_parts(events: Vec<Event>, gap_breaks: Vec<usize>) -> Self {
        Self { events, gap_breaks }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn gap_breaks(&self) -> &[usize] {
        &self.gap_breaks
    }

    /// True when a gap separates `index - 1` from `index`.
    pub fn is_gap_break(&self, index: usize) -> bool {
        self.gap_breaks.binary_search(&index).is_ok()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Number of events per label.
    pub fn label_counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.label).or_insert(0) += 1;
        }
        counts
    }
}

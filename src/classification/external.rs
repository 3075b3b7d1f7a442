//! Bridge for black-box classifiers (NSLR-HMM, REMoDNaV, U'n'Eye, ...).
//!
//! A black box receives the gaze signal and reports its result in whichever
//! of the native shapes it produces. Every shape is normalised into a
//! `ContinuousClassification` on the signal's grid, and malformed results are
//! rejected rather than repaired.

use std::fmt;
use std::sync::Arc;

use crate::error::{GazeError, Result};
use crate::models::{ContinuousClassification, Event, Label};
use crate::segmentation::{onsets_to_continuous, to_continuous};
use crate::signal::AngularSignal;
use crate::timeline::TemporalGrid;
use crate::log_error;

const ENABLE_LOGS: bool = true;

/// Native result shapes a black-box classifier may return.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalOutput {
    /// One label per sample.
    Continuous(Vec<Label>),
    /// Index events that must partition the samples.
    Events(Vec<Event>),
    /// `(onset_time, label)` pairs in seconds.
    Onsets(Vec<(f64, Label)>),
}

impl ExternalOutput {
    /// Per-sample NSLR-HMM class codes.
    pub fn from_nslr_codes(codes: &[u8]) -> Result<Self> {
        let labels = codes
            .iter()
            .map(|&code| Label::from_nslr_code(code))
            .collect::<Result<Vec<_>>>()?;
        Ok(ExternalOutput::Continuous(labels))
    }

    /// REMoDNaV `(start_time, code)` events.
    pub fn from_remodnav_events(events: &[(f64, &str)]) -> Result<Self> {
        let onsets = events
            .iter()
            .map(|&(time, code)| Ok((time, Label::from_remodnav_code(code)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(ExternalOutput::Onsets(onsets))
    }

    pub fn into_continuous(self, grid: &TemporalGrid) -> Result<ContinuousClassification> {
        match self {
            ExternalOutput::Continuous(labels) => {
                if labels.len() != grid.len() {
                    return Err(GazeError::invalid(format!(
                        "external classifier returned {} labels for {} samples",
                        labels.len(),
                        grid.len()
                    )));
                }
                Ok(ContinuousClassification::new(labels))
            }
            ExternalOutput::Events(events) => to_continuous(&events, grid.len()),
            ExternalOutput::Onsets(onsets) => onsets_to_continuous(&onsets, grid),
        }
    }
}

type ExternalFn = dyn Fn(&AngularSignal) -> anyhow::Result<ExternalOutput> + Send + Sync;

/// A named black-box classifier.
#[derive(Clone)]
pub struct ExternalClassifier {
    name: String,
    run: Arc<ExternalFn>,
}

impl ExternalClassifier {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&AngularSignal) -> anyhow::Result<ExternalOutput> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classify(&self, signal: &AngularSignal) -> Result<ContinuousClassification> {
        let output = (self.run)(signal).map_err(|source| {
            log_error!("External classifier '{}' failed: {:#}", self.name, source);
            GazeError::External {
                name: self.name.clone(),
                source,
            }
        })?;
        output.into_continuous(signal.grid())
    }
}

impl fmt::Debug for ExternalClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalClassifier")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoverageFault;
    use assert_matches::assert_matches;

    use crate::models::Label::{Fixation as F, Saccade as S, Undefined as U};

    fn signal(n: usize) -> AngularSignal {
        let grid = TemporalGrid::from_sampling_rate(n, 10.0, 0.0).unwrap();
        AngularSignal::new(grid, vec![0.0; n], vec![0.0; n]).unwrap()
    }

    #[test]
    fn continuous_output_must_match_length() {
        let clf = ExternalClassifier::new("short", |_| Ok(ExternalOutput::Continuous(vec![F])));
        assert_matches!(clf.classify(&signal(3)), Err(GazeError::InvalidInput(_)));
    }

    #[test]
    fn partial_event_output_is_rejected() {
        let clf = ExternalClassifier::new("partial", |_| {
            Ok(ExternalOutput::Events(vec![
                Event::new(0, 1, F),
                Event::new(3, 4, S),
            ]))
        });
        assert_matches!(
            clf.classify(&signal(5)),
            Err(GazeError::Coverage {
                fault: CoverageFault::Missing(2),
                ..
            })
        );
    }

    #[test]
    fn remodnav_onsets_are_mapped_to_samples() {
        let clf = ExternalClassifier::new("remodnav", |signal: &AngularSignal| {
            let start = signal.grid().timestamps()[0];
            ExternalOutput::from_remodnav_events(&[(start + 0.1, "FIXA"), (start + 0.35, "ISAC")])
                .map_err(anyhow::Error::from)
        });
        let labels = clf.classify(&signal(5)).unwrap();
        assert_eq!(labels.labels(), &[U, F, F, F, S]);
    }

    #[test]
    fn nslr_codes_are_mapped() {
        let clf = ExternalClassifier::new("nslr", |_| {
            ExternalOutput::from_nslr_codes(&[1, 1, 2, 3]).map_err(anyhow::Error::from)
        });
        assert_eq!(clf.classify(&signal(4)).unwrap().labels(), &[F, F, S, Label::Pso]);
    }

    #[test]
    fn failures_are_wrapped_with_name() {
        let clf = ExternalClassifier::new("uneye", |_| Err(anyhow::anyhow!("model file missing")));
        let err = clf.classify(&signal(2)).unwrap_err();
        assert_matches!(&err, GazeError::External { name, .. } if name == "uneye");
        assert!(err.to_string().contains("model file missing"));
    }
}

//! Error types for gaze classification and event conversion.

use thiserror::Error;

/// Result type alias using `GazeError`.
pub type Result<T> = std::result::Result<T, GazeError>;

/// Errors that abort a classification or conversion call.
///
/// Algorithmic edge cases (degenerate dispersion windows, missing velocity at
/// run boundaries) never surface here; they are absorbed as fallback labels.
#[derive(Debug, Error)]
pub enum GazeError {
    /// Malformed timestamps or gaze samples.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A classifier was invoked without a required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// An event list does not partition the sample range exactly once.
    #[error("Event list does not cover samples 0..{n} exactly once: {fault}")]
    Coverage {
        /// Number of samples the events were checked against.
        n: usize,
        /// First defect found while scanning.
        fault: CoverageFault,
    },

    /// A black-box classifier failed.
    #[error("External classifier '{name}' failed: {source}")]
    External {
        /// Name the classifier was registered under.
        name: String,
        /// Underlying failure reported by the classifier.
        #[source]
        source: anyhow::Error,
    },
}

/// The first coverage defect found in an event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoverageFault {
    /// No event covers this sample.
    #[error("sample {0} is not covered")]
    Missing(usize),

    /// This sample is covered by more than one event.
    #[error("sample {0} is covered twice")]
    Overlap(usize),

    /// Event ends before it starts.
    #[error("event onset {onset} is after its offset {offset}")]
    Inverted { onset: usize, offset: usize },

    /// Event reaches past the last sample.
    #[error("event offset {offset} is past the last sample")]
    OutOfRange { offset: usize },
}

impl GazeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GazeError::InvalidInput(msg.into())
    }
}

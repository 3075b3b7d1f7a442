//! Eye-movement event classification.
//!
//! Raw gaze samples (`times`, `x`, `y` in degrees) are labelled per sample by
//! a threshold classifier (I-VT, I-DT) or a black-box classifier, then
//! converted to an ordered event list that covers every sample exactly once.
//!
//! ```ignore
//! use gazeseg::{classify_recording, ClassificationConfig, Classifier};
//!
//! let result = classify_recording(
//!     vec![0.0, 0.01, 0.02, 0.03, 0.04],
//!     vec![0.0, 0.0, 0.0, 5.0, 5.0],
//!     vec![0.0; 5],
//!     &Classifier::Velocity,
//!     &ClassificationConfig::velocity(100.0),
//! )?;
//! for event in result.events.events() {
//!     println!("{}..={} {}", event.onset, event.offset, event.label);
//! }
//! ```

pub mod classification;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod segmentation;
pub mod signal;
pub mod timeline;
pub mod utils;

pub use classification::{ClassificationConfig, Classifier, ExternalClassifier, ExternalOutput};
pub use error::{CoverageFault, GazeError, Result};
pub use models::{ContinuousClassification, DiscreteClassification, Event, Label};
pub use pipeline::{classify_recording, classify_signal, Classification};
pub use segmentation::{merge_adjacent, normalize, to_continuous, to_discrete, NormalizerConfig};
pub use signal::{AngularSignal, DistanceMetric};
pub use timeline::TemporalGrid;

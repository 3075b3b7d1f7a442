pub mod config;
pub mod dispersion;
pub mod external;
pub mod velocity;

pub use config::ClassificationConfig;
pub use dispersion::classify_dispersion;
pub use external::{ExternalClassifier, ExternalOutput};
pub use velocity::classify_velocity;

use crate::error::Result;
use crate::models::ContinuousClassification;
use crate::signal::AngularSignal;

/// Every classifier shares one contract: signal + options in, one label per
/// sample out. New algorithms are new variants.
#[derive(Debug, Clone)]
pub enum Classifier {
    /// I-VT, needs `velocity_threshold`.
    Velocity,
    /// I-DT, needs `dispersion_threshold` and `min_duration`.
    Dispersion,
    /// Black-box classifier normalised through the converter.
    External(ExternalClassifier),
}

impl Classifier {
    pub fn name(&self) -> &str {
        match self {
            Classifier::Velocity => "I-VT",
            Classifier::Dispersion => "I-DT",
            Classifier::External(external) => external.name(),
        }
    }

    pub fn classify(
        &self,
        signal: &AngularSignal,
        config: &ClassificationConfig,
    ) -> Result<ContinuousClassification> {
        match self {
            Classifier::Velocity => classify_velocity(signal, config),
            Classifier::Dispersion => classify_dispersion(signal, config),
            Classifier::External(external) => external.classify(signal),
        }
    }
}

pub mod angular;
pub mod units;

pub use angular::{AngularSignal, DistanceMetric};
pub use units::{coords_to_degrees, pixels_to_degrees, ScreenAxis};

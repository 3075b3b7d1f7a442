pub mod event;
pub mod label;

pub use event::{ContinuousClassification, DiscreteClassification, Event};
pub use label::Label;

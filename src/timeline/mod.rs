pub mod grid;

pub use grid::{TemporalGrid, DEFAULT_GAP_TOLERANCE};

pub mod convert;
pub mod merge;

pub use convert::{onsets_to_continuous, to_continuous, to_discrete};
pub use merge::{merge_adjacent, normalize, NormalizerConfig};

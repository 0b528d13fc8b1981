pub mod normalizer;
pub mod sample;

pub use normalizer::{normalize_tables, NormalizeReport};
pub use sample::{sample_catalog, SampleMovie, SAMPLE_MOVIES};

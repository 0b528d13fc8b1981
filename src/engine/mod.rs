//! Filter evaluation and random selection over a loaded catalog.

pub mod filter;
pub mod select;
pub mod session;

pub use filter::{apply_filter, FilterSpec, GenreChoice, YearRange};
pub use select::select_random;
pub use session::{Session, Selection};

//! Operations behind the CLI commands.
//!
//! Each returns a serializable result so the binary only has to print it.

pub mod filter;
pub mod genres;
pub mod links;
pub mod pick;
pub mod stats;

pub use filter::{build_filter_spec, run_filter, FilterArgs, FilterResult};
pub use genres::{list_genres, resolve_genre, GenresResult};
pub use links::{search_links, SearchLinks};
pub use pick::{pick, PickResult, EMPTY_NOTICE};
pub use stats::{catalog_stats, StatsResult};

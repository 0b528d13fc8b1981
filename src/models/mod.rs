pub mod catalog;
pub mod movie;

pub use catalog::Catalog;
pub use movie::{MovieRecord, DEFAULT_OVERVIEW};

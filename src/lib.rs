// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_precision_loss: Row counts never approach f64's integer limit
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - items_after_statements: Output structs are clearer near their usage
// - module_name_repetitions: `filter::FilterSpec` reads better than `filter::Spec`
// - option_if_let_else: if-let is often clearer
// - manual_let_else: if-let with early return is often clearer in context
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::module_name_repetitions,
    clippy::option_if_let_else,
    clippy::manual_let_else
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod operations;
pub mod source;

//! Storage-facing edges of the pipeline: table loading and result writing.

pub mod loader;
pub mod writer;

pub use loader::{load_tables, TableError, TablePaths};
pub use writer::{write_results, WriteError};

//! Loads public trade datasets into the SQLite reference store read by the
//! intelligence engine.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sources;
pub mod writer;

pub use error::LoaderError;
pub use pipeline::{run, IngestReport};
pub use writer::SqliteWriter;

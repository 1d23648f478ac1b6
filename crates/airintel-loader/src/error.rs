use airintel_models::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

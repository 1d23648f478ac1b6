use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored value: {0}")]
    Model(#[from] airintel_models::ModelError),

    #[error("Store not available: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Reference data unavailable: {0}")]
    ReferenceDataUnavailable(String),

    #[error("Invalid context: {0}")]
    InvalidContext(String),

    #[error("Enrichment provider error: {0}")]
    Enrichment(String),

    #[error("Enrichment timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Store error: {0}")]
    Store(#[from] airintel_store::StoreError),
}

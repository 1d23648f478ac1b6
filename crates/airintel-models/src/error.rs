use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unmapped {source_feed} transport code: {code}")]
    UnmappedTransportCode {
        source_feed: &'static str,
        code: String,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

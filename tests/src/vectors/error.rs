//! Errors raised while loading known-answer vectors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("malformed vector file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hex decode error in {field}: {source}")]
    Hex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },
}

pub type Result<T> = std::result::Result<T, VectorError>;

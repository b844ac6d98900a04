use crate::episode::error::FormatError;
use crate::source::error::FetchError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("Invalid page request: {message}")]
    InvalidRequest { message: String },

    #[error("FetchError: {0}")]
    Fetch(#[from] FetchError),

    #[error("FormatError: {0}")]
    Format(#[from] FormatError),
}

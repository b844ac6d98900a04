#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Episode API responded with status {status} for `{url}`.")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Failed to parse API response: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("The URL `{url}` is not a valid episode API URL.")]
    InvalidUrl { url: String },
}

impl From<wreq::Error> for FetchError {
    fn from(e: wreq::Error) -> Self {
        FetchError::RequestFailed(Box::new(e))
    }
}

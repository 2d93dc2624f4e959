use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid provider credentials header {0}")]
    InvalidHeader(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Network(e.to_string())
    }
}

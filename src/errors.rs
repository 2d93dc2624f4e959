// errors.rs
use crate::pipeline::PipelineError;
use thiserror::Error;

/// Errors surfaced by the HTTP layer. Pipeline failures are wrapped so the
/// responder can pick a status code per endpoint.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    /// Message shown to clients, without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            ServerError::BadRequest(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

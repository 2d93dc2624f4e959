use crate::errors::ServerError;
use crate::pipeline::PipelineError;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Status for an error. `insufficient` lets each endpoint decide how "no
/// usable data" is reported.
pub fn status_code(err: &ServerError, insufficient: u16) -> u16 {
    match err {
        ServerError::NotFound => 404,
        ServerError::BadRequest(_) => 400,
        ServerError::Pipeline(PipelineError::InvalidRegion(_)) => 400,
        ServerError::Pipeline(PipelineError::InsufficientData(_)) => insufficient,
        ServerError::XlsxError(_) | ServerError::InternalError => 500,
    }
}

/// JSON error body in the `{"detail": ...}` shape API clients expect.
pub fn json_error_response(err: &ServerError, insufficient: u16) -> Response {
    let status = status_code(err, insufficient);
    let body = serde_json::json!({ "detail": err.detail() }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

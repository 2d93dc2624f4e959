use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

/// 200 with a JSON body. Any origin may read it; the browser frontend is
/// served separately.
pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

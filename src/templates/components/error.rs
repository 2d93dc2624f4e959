use crate::errors::ServerError;
use crate::responses::status_code;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into an HTML error page. Pages treat missing data as
/// a bad request, matching the analysis endpoint.
pub fn html_error_response(err: ServerError) -> Response {
    let status = status_code(&err, 400);
    render_error(status, &err.detail())
}

fn render_error(status: u16, message: &str) -> Response {
    let page = maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }"
                    "p { font-size: 1.1rem; color: #444; }"
                }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Back to search" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

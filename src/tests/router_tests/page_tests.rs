use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::{bargain_scenario, read_body, service_with, StubProvider};
use astra::Body;
use http::{Method, Request};
use std::sync::Arc;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn home_page_has_both_forms() {
    let service = service_with(Arc::new(StubProvider::new()));
    let mut resp = handle(get("/"), &service).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("action=\"/listings\""));
    assert!(body.contains("action=\"/report\""));
}

#[test]
fn report_page_renders_results() {
    let stub = Arc::new(StubProvider::new().with_region("94110", bargain_scenario()));
    let service = service_with(stub);

    let mut resp = handle(get("/report?zip=94110&limit=50"), &service).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("1 Bargain Ln"));
    assert!(body.contains("/anomalies/94110/export?limit=50"));
}

#[test]
fn listings_page_shows_cards() {
    let stub = Arc::new(StubProvider::new().with_region("94110", bargain_scenario()));
    let service = service_with(stub);

    let mut resp = handle(get("/listings?zip=94110&beds=&baths=2"), &service).unwrap();
    let body = read_body(&mut resp);
    assert!(body.contains("100 Maple Dr"));
    assert!(!body.contains("Bargain Ln"));
    assert!(body.contains("$600,000"));
}

#[test]
fn page_errors_render_as_html() {
    let service = service_with(Arc::new(StubProvider::new()));

    let err = handle(get("/report"), &service).err().expect("handler error");
    let mut resp = html_error_response(err);
    assert_eq!(resp.status(), 400);
    assert!(read_body(&mut resp).contains("missing query parameter `zip`"));

    let err = handle(get("/report?zip=94110"), &service).err().expect("handler error");
    let resp = html_error_response(err);
    assert_eq!(resp.status(), 400);
}

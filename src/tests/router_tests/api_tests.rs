use crate::router::handle;
use crate::tests::utils::{bargain_scenario, raw_listing, read_body, service_with, StubProvider};
use astra::Body;
use http::{Method, Request};
use serde_json::Value;
use std::sync::Arc;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_body(resp: &mut astra::Response) -> Value {
    serde_json::from_str(&read_body(resp)).expect("json body")
}

#[test]
fn housing_returns_listings_as_json() {
    let stub = Arc::new(StubProvider::new().with_region("94110", bargain_scenario()));
    let service = service_with(stub);

    let mut resp = handle(get("/housing/94110"), &service).expect("handler");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

    let body = json_body(&mut resp);
    let listings = body.as_array().expect("array");
    assert_eq!(listings.len(), 12);
    assert!(listings[0].get("areaSqft").is_some());
    assert_eq!(listings[0]["regionCode"], "94110");
}

#[test]
fn housing_applies_filters() {
    let stub = Arc::new(StubProvider::new().with_region("94110", bargain_scenario()));
    let service = service_with(stub);

    let mut resp = handle(get("/housing/94110?beds=3&max_price=650000"), &service).unwrap();
    let body = json_body(&mut resp);
    let prices: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["price"].as_f64().unwrap())
        .collect();

    assert_eq!(prices.len(), 6);
    assert!(prices.iter().all(|p| *p >= 600_000.0 && *p <= 650_000.0));
}

#[test]
fn housing_with_nothing_found_is_404() {
    let stub = Arc::new(StubProvider::new().failing("94110"));
    let service = service_with(stub);

    let mut resp = handle(get("/housing/94110"), &service).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        json_body(&mut resp)["detail"],
        "No valid housing data near ZIP 94110."
    );
}

#[test]
fn housing_rejects_bad_region_and_limit() {
    let service = service_with(Arc::new(StubProvider::new()));

    let resp = handle(get("/housing/abc"), &service).unwrap();
    assert_eq!(resp.status(), 400);

    let resp = handle(get("/housing/94110?limit=500"), &service).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn anomalies_report_lists_the_bargains() {
    let stub = Arc::new(StubProvider::new().with_region("94110", bargain_scenario()));
    let service = service_with(stub);

    let mut resp = handle(get("/anomalies/94110?limit=50"), &service).unwrap();
    assert_eq!(resp.status(), 200);

    let body = json_body(&mut resp);
    assert_eq!(body["region"], "94110");
    assert_eq!(body["listingsAnalyzed"], 12);
    assert_eq!(body["counts"]["total"], 2);

    let importance = &body["featureImportance"];
    let sum = importance["bedrooms"].as_f64().unwrap()
        + importance["bathrooms"].as_f64().unwrap()
        + importance["areaSqft"].as_f64().unwrap();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn anomalies_with_too_little_data_is_400() {
    let feed = vec![raw_listing("1 Lone Rd", 3.0, 2.0, 1500.0, 450_000.0)];
    let stub = Arc::new(StubProvider::new().with_region("94110", feed));
    let service = service_with(stub);

    let resp = handle(get("/anomalies/94110"), &service).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn anomalies_limit_below_minimum_is_rejected() {
    let service = service_with(Arc::new(StubProvider::new()));
    let resp = handle(get("/anomalies/94110?limit=2"), &service).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn export_returns_a_workbook() {
    let stub = Arc::new(StubProvider::new().with_region("94110", bargain_scenario()));
    let service = service_with(stub);

    let resp = handle(get("/anomalies/94110/export"), &service).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["Content-Disposition"],
        "attachment; filename=\"upgrades_94110.xlsx\""
    );
}

#[test]
fn unknown_route_is_not_found() {
    let service = service_with(Arc::new(StubProvider::new()));
    let err = handle(get("/nope"), &service).err().expect("handler error");
    assert!(matches!(err, crate::errors::ServerError::NotFound));
}

// zillow.rs
use crate::provider::{ListingsProvider, ProviderError, RawListing};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("listing_valuation/", env!("CARGO_PKG_VERSION"));
const SEARCH_PATH: &str = "propertyExtendedSearch";

/// RapidAPI-hosted Zillow search client.
pub struct ZillowProvider {
    client: Client,
    host: String,
}

impl ZillowProvider {
    pub fn new(
        api_key: impl Into<String>,
        host: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let host = host.into();
        let headers = rapidapi_headers(&api_key.into(), &host)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, host })
    }
}

/// Credentials go on every request, so bad values fail at construction.
fn rapidapi_headers(api_key: &str, host: &str) -> Result<HeaderMap, ProviderError> {
    let key = HeaderValue::from_str(api_key)
        .map_err(|e| ProviderError::InvalidHeader(format!("X-RapidAPI-Key: {e}")))?;
    let host = HeaderValue::from_str(host)
        .map_err(|e| ProviderError::InvalidHeader(format!("X-RapidAPI-Host: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert("X-RapidAPI-Key", key);
    headers.insert("X-RapidAPI-Host", host);
    Ok(headers)
}

impl ListingsProvider for ZillowProvider {
    fn fetch(&self, region: &str, limit: u32) -> Result<Vec<RawListing>, ProviderError> {
        let start = Instant::now();
        let url = format!("https://{}/{}", self.host, SEARCH_PATH);
        let limit = limit.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("location", region),
                ("status_type", "ForSale"),
                ("home_type", "Houses"),
                ("limit", limit.as_str()),
            ])
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            warn!(region, status = status.as_u16(), "provider returned non-success status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value =
            serde_json::from_str(&text).map_err(|e| ProviderError::JsonParse(e.to_string()))?;
        let listings = parse_payload(payload)?;

        info!(
            region,
            count = listings.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetched provider listings"
        );
        Ok(listings)
    }
}

/// The search endpoint answers with either a bare array or an object wrapping
/// the array under `props` (current) or `properties` (older responses).
pub fn parse_payload(payload: Value) -> Result<Vec<RawListing>, ProviderError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("props").or_else(|| map.remove("properties")) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ProviderError::UnexpectedShape(
                    "listing collection is not an array".into(),
                ))
            }
            None => {
                return Err(ProviderError::UnexpectedShape(
                    "props/properties missing".into(),
                ))
            }
        },
        _ => {
            return Err(ProviderError::UnexpectedShape(
                "payload is neither array nor object".into(),
            ))
        }
    };

    let mut listings = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<RawListing>(item) {
            Ok(listing) => listings.push(listing),
            Err(e) => debug!(error = %e, "skipping undecodable provider item"),
        }
    }

    Ok(listings)
}

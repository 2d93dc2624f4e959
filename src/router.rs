use crate::domain::ListingFilter;
use crate::errors::ServerError;
use crate::pipeline::ValuationService;
use crate::responses::{html_response, json_error_response, json_response, ResultResp};
use crate::spreadsheets::export_report_xlsx;
use crate::templates;
use astra::Request;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::debug;

const HOUSING_LIMITS: RangeInclusive<u32> = 1..=100;
const HOUSING_DEFAULT_LIMIT: u32 = 20;
const ANALYSIS_LIMITS: RangeInclusive<u32> = 5..=200;
const ANALYSIS_DEFAULT_LIMIT: u32 = 50;

pub fn handle(req: Request, service: &ValuationService) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    debug!(method, path, "request");

    match (method, segments.as_slice()) {
        ("GET", []) => html_response(templates::pages::home_page()),

        // JSON API; errors are answered as JSON too.
        ("GET", ["housing", zip]) => {
            housing(zip, &params, service).or_else(|e| Ok(json_error_response(&e, 404)))
        }
        ("GET", ["anomalies", zip]) => {
            anomalies(zip, &params, service).or_else(|e| Ok(json_error_response(&e, 400)))
        }
        ("GET", ["anomalies", zip, "export"]) => {
            let limit = limit_param(&params, ANALYSIS_DEFAULT_LIMIT, ANALYSIS_LIMITS)?;
            export_report_xlsx(&service.analysis(zip, limit)?)
        }

        // Pages
        ("GET", ["listings"]) => {
            let zip = required(&params, "zip")?;
            let limit = limit_param(&params, HOUSING_DEFAULT_LIMIT, HOUSING_LIMITS)?;
            let filter = filter_params(&params)?;
            let listings = service.listings(zip, limit, &filter)?;
            html_response(templates::pages::listings_page(zip, &listings))
        }
        ("GET", ["report"]) => {
            let zip = required(&params, "zip")?;
            let limit = limit_param(&params, ANALYSIS_DEFAULT_LIMIT, ANALYSIS_LIMITS)?;
            let report = service.analysis(zip, limit)?;
            html_response(templates::pages::report_page(&report, limit))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn housing(zip: &str, params: &HashMap<String, String>, service: &ValuationService) -> ResultResp {
    let limit = limit_param(params, HOUSING_DEFAULT_LIMIT, HOUSING_LIMITS)?;
    let filter = filter_params(params)?;
    json_response(&service.listings(zip, limit, &filter)?)
}

fn anomalies(zip: &str, params: &HashMap<String, String>, service: &ValuationService) -> ResultResp {
    let limit = limit_param(params, ANALYSIS_DEFAULT_LIMIT, ANALYSIS_LIMITS)?;
    json_response(&service.analysis(zip, limit)?)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn required<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, ServerError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing query parameter `{name}`")))
}

fn limit_param(
    params: &HashMap<String, String>,
    default: u32,
    allowed: RangeInclusive<u32>,
) -> Result<u32, ServerError> {
    let Some(raw) = params.get("limit").filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };

    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| allowed.contains(n))
        .ok_or_else(|| {
            ServerError::BadRequest(format!(
                "limit must be between {} and {}",
                allowed.start(),
                allowed.end()
            ))
        })
}

/// Blank fields mean "no filter", as submitted by the search form.
fn filter_params(params: &HashMap<String, String>) -> Result<ListingFilter, ServerError> {
    let number = |name: &str| -> Result<Option<f64>, ServerError> {
        match params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(v) => v
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(Some)
                .ok_or_else(|| ServerError::BadRequest(format!("`{name}` must be a non-negative number"))),
        }
    };

    Ok(ListingFilter {
        min_beds: number("beds")?,
        min_baths: number("baths")?,
        min_price: number("min_price")?,
        max_price: number("max_price")?,
    })
}

use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Provider item (only the fields we read)
//  ├── address, city, state, zipcode
//  ├── bedrooms | beds
//  ├── bathrooms | baths
//  ├── livingArea | area
//  ├── price | unformattedPrice | zestimate | lastSoldPrice
//  ├── latitude, longitude
//  └── zpid | id

/// One listing as the provider sent it. Every field is optional and numeric
/// fields accept either JSON numbers or formatted strings like `"$450,000"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub zipcode: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub beds: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub baths: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub living_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub area: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub unformatted_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub zestimate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub last_sold_price: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub zpid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Reads a number out of a JSON value, tolerating currency symbols, thousands
/// separators and unit suffixes in strings.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_formatted_number(s),
        _ => None,
    }
}

pub fn parse_formatted_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

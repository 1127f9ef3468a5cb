//! Country record types
//!
//! Serde shapes follow the dataset file: timezone keys keep their camelCase
//! names, coordinates are numeric once loaded, and `review` only appears in
//! output after it has been set.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One country entry in the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub nationality: String,
    #[serde(deserialize_with = "de_coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "de_coordinate")]
    pub longitude: f64,
    pub finance: Finance,
    pub timezones: Vec<TimezoneEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// Currency details nested under a country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finance {
    pub currency: String,
    pub currency_name: String,
    pub currency_symbol: String,
}

/// One timezone entry; `gmtOffset` may arrive numeric and is kept in string form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneEntry {
    pub zone_name: String,
    #[serde(deserialize_with = "de_stringlike")]
    pub gmt_offset: String,
    pub gmt_offset_name: String,
    pub abbreviation: String,
    pub tz_name: String,
}

/// Parse a coordinate that may be stored as a number or a numeric string.
///
/// Dataset rows that fail this check abort loading; coordinates are never
/// coerced silently at filter time.
pub fn coordinate_from_value(value: &Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("coordinate {n} is out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("coordinate '{s}' is not numeric")),
        other => Err(format!("coordinate has unexpected type: {other}")),
    }
}

fn de_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coordinate_from_value(&value).map_err(serde::de::Error::custom)
}

fn de_stringlike<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

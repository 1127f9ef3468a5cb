//! Mutation endpoints
//!
//! POST handlers validate the decoded body against the endpoint's required
//! field set, then apply the change through the store. Nested finance and
//! timezones payloads may arrive as JSON-encoded strings (form submissions)
//! and are decoded before validation.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::Value;

use crate::error::{ApiError, ErrorKind};
use crate::http;
use crate::store::{
    coordinate_from_value, Country, CountryStore, Finance, StoreError, TimezoneEntry,
    UpsertOutcome,
};

/// POST /addCountry — create a record or overwrite an existing one
pub async fn add_country(body: &Value, store: &CountryStore) -> Response<Full<Bytes>> {
    let record = match validate_country(body) {
        Ok(record) => record,
        Err(e) => return http::error_response(&e, false),
    };

    match store.insert_or_update(record).await {
        UpsertOutcome::Created => http::json_response(
            StatusCode::CREATED,
            &serde_json::json!({ "message": "Created Successfully" }),
            false,
        ),
        UpsertOutcome::Updated => http::no_content(),
    }
}

/// POST /addReview — attach a free-text review to an existing country
pub async fn add_review(body: &Value, store: &CountryStore) -> Response<Full<Bytes>> {
    let (Some(name), Some(review)) = (
        nonempty_string(body, "name"),
        nonempty_string(body, "review"),
    ) else {
        return http::error_response(
            &ApiError::missing_params("Both parameters are required."),
            false,
        );
    };

    match store.set_review(&name, &review).await {
        Ok(()) => http::json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "Created successfully" }),
            false,
        ),
        Err(StoreError::NotFound) => {
            http::error_response(&ApiError::not_found("Country not found"), false)
        }
    }
}

/// POST /addFavorite — append a copy of an existing country to the favorites
pub async fn add_favorite(body: &Value, store: &CountryStore) -> Response<Full<Bytes>> {
    let Some(name) = nonempty_string(body, "name") else {
        return http::error_response(
            &ApiError::missing_params("A name parameter is required."),
            false,
        );
    };

    match store.add_favorite(&name).await {
        Ok(_) => http::json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "Added to favorites" }),
            false,
        ),
        Err(StoreError::NotFound) => {
            http::error_response(&ApiError::not_found("Country not found"), false)
        }
    }
}

/// Validate the full addCountry payload into a record ready for the store.
fn validate_country(body: &Value) -> Result<Country, ApiError> {
    let (Some(name), Some(capital), Some(region), Some(subregion), Some(nationality)) = (
        nonempty_string(body, "name"),
        nonempty_string(body, "capital"),
        nonempty_string(body, "region"),
        nonempty_string(body, "subregion"),
        nonempty_string(body, "nationality"),
    ) else {
        return Err(ApiError::missing_params("All parameters are required."));
    };

    let latitude = coordinate_field(body, "latitude")?;
    let longitude = coordinate_field(body, "longitude")?;
    let finance = validate_finance(body)?;
    let timezones = validate_timezones(body)?;

    Ok(Country {
        name,
        capital,
        region,
        subregion,
        nationality,
        latitude,
        longitude,
        finance,
        timezones,
        review: None,
    })
}

fn validate_finance(body: &Value) -> Result<Finance, ApiError> {
    let error = || {
        ApiError::new(
            ErrorKind::MissingParamsFinance,
            "A finance object with currency, currency_name and currency_symbol is required.",
        )
    };

    let raw = body.get("finance").ok_or_else(error)?;
    let decoded = decode_nested(raw, "finance")?;

    let currency = nonempty_string(&decoded, "currency").ok_or_else(error)?;
    let currency_name = nonempty_string(&decoded, "currency_name").ok_or_else(error)?;
    let currency_symbol = nonempty_string(&decoded, "currency_symbol").ok_or_else(error)?;

    Ok(Finance {
        currency,
        currency_name,
        currency_symbol,
    })
}

fn validate_timezones(body: &Value) -> Result<Vec<TimezoneEntry>, ApiError> {
    let error = || {
        ApiError::new(
            ErrorKind::MissingParamsTimezones,
            "At least one complete timezone entry is required.",
        )
    };

    let raw = body.get("timezones").ok_or_else(error)?;
    let decoded = decode_nested(raw, "timezones")?;

    let entries = decoded.as_array().filter(|a| !a.is_empty()).ok_or_else(error)?;

    entries
        .iter()
        .map(|entry| {
            Ok(TimezoneEntry {
                zone_name: nonempty_string(entry, "zoneName").ok_or_else(error)?,
                gmt_offset: nonempty_string(entry, "gmtOffset").ok_or_else(error)?,
                gmt_offset_name: nonempty_string(entry, "gmtOffsetName").ok_or_else(error)?,
                abbreviation: nonempty_string(entry, "abbreviation").ok_or_else(error)?,
                tz_name: nonempty_string(entry, "tzName").ok_or_else(error)?,
            })
        })
        .collect()
}

/// Form submissions carry nested structures as JSON-encoded strings;
/// decode those before validating. Structured values pass through.
fn decode_nested(value: &Value, what: &str) -> Result<Value, ApiError> {
    match value {
        Value::String(s) => serde_json::from_str(s).map_err(|_| {
            ApiError::invalid_json(format!("The {what} payload could not be decoded as JSON."))
        }),
        other => Ok(other.clone()),
    }
}

/// A present, non-empty string field; numbers are accepted in string form.
fn nonempty_string(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coordinate_field(body: &Value, field: &str) -> Result<f64, ApiError> {
    let value = body
        .get(field)
        .filter(|v| !matches!(v, Value::Null) && !matches!(v, Value::String(s) if s.is_empty()))
        .ok_or_else(|| ApiError::missing_params("All parameters are required."))?;

    coordinate_from_value(value)
        .map_err(|_| ApiError::invalid_params("Latitude and longitude must be numbers."))
}

//! Request body decoding
//!
//! Accumulates a POST body and decodes it as JSON or form-encoded data
//! depending on the declared content type, yielding a `serde_json::Value`
//! for the mutation handlers.

use http_body_util::BodyExt;
use serde_json::Value;

use super::query;
use crate::error::ApiError;

/// Collect the body and decode it according to `Content-Type`.
pub async fn decode(
    content_type: Option<&str>,
    body: hyper::body::Incoming,
) -> Result<Value, ApiError> {
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => {
            return Err(ApiError::invalid_json("The request body could not be read."));
        }
    };
    decode_bytes(content_type, &bytes)
}

/// Decode raw body bytes.
///
/// A `application/json` content type selects JSON decoding; anything else
/// (including an absent header) is treated as form-encoded, matching the
/// endpoint's historical behavior for HTML form submissions.
pub fn decode_bytes(content_type: Option<&str>, bytes: &[u8]) -> Result<Value, ApiError> {
    let is_json = content_type
        .map(str::to_ascii_lowercase)
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        serde_json::from_slice(bytes)
            .map_err(|_| ApiError::invalid_json("The payload could not be decoded as JSON."))
    } else {
        let text = String::from_utf8_lossy(bytes);
        let map = query::parse_pairs(&text)
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        Ok(Value::Object(map))
    }
}

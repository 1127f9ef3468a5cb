//! HTTP response building
//!
//! JSON envelope with explicit `Content-Type` and `Content-Length`; HEAD
//! requests and 204 responses carry no body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::ApiError;
use crate::logger;

/// Build a JSON response from any serializable body.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"message":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    let content_length = json.len();
    let body = if is_head || status == StatusCode::NO_CONTENT {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_u16(), &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Render an `ApiError` as its JSON body with the kind's status.
pub fn error_response(error: &ApiError, is_head: bool) -> Response<Full<Bytes>> {
    json_response(error.status(), &error.to_body(), is_head)
}

/// Build 204 No Content (always bodyless).
pub fn no_content() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(204, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large.
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error(413, &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build 304 Not Modified for a cached asset.
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(304, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response for an in-memory static asset.
pub fn build_asset_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(200, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(status: u16, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_json_response_sets_envelope_headers() {
        let response = json_response(StatusCode::OK, &serde_json::json!({"message": "ok"}), false);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        let expected_len = r#"{"message":"ok"}"#.len().to_string();
        assert_eq!(
            response.headers().get("Content-Length").unwrap(),
            expected_len.as_str()
        );
    }

    #[tokio::test]
    async fn test_head_keeps_length_but_drops_body() {
        let response = json_response(StatusCode::OK, &serde_json::json!({"message": "ok"}), true);
        let len: usize = response
            .headers()
            .get("Content-Length")
            .unwrap()
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(len > 0);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_no_content_has_empty_body() {
        let response = no_content();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_error_response_carries_id() {
        let err = ApiError::invalid_params("bad");
        let response = error_response(&err, false);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["id"], "invalidParams");
    }
}

//! Request dispatch
//!
//! Entry point for HTTP request processing: body-size guard, route table
//! lookup, endpoint hand-off, and access logging on the way out.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response};

use super::routes::Endpoint;
use super::{assets, countries, mutations};
use crate::config::AppState;
use crate::error::ApiError;
use crate::http::{self, body, query};
use crate::logger::{self, AccessLogEntry};

/// Request information shared by the endpoint handlers
pub struct RequestContext {
    pub query: HashMap<String, String>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

impl RequestContext {
    /// A present, non-empty query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let raw_query = req.uri().query().map(ToString::to_string);
    let http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    let response = respond(req, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method, path);
        entry.query = raw_query;
        entry.http_version = http_version;
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.status = response.status().as_u16();
        entry.body_bytes =
            usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn respond(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let is_head = method == Method::HEAD;
    let path = req.uri().path().to_string();

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    // Unmatched path or method combination, including HEAD on a POST route
    let Some(endpoint) = state.routes.lookup(&method, &path) else {
        return http::error_response(&ApiError::route_not_found(), is_head);
    };

    let ctx = RequestContext {
        query: req.uri().query().map(query::parse_pairs).unwrap_or_default(),
        is_head,
        if_none_match: header_string(&req, "if-none-match"),
    };

    match endpoint {
        Endpoint::Index => assets::serve_index(&ctx, &state.assets),
        Endpoint::Stylesheet => assets::serve_stylesheet(&ctx, &state.assets),
        Endpoint::GetCountry => countries::get_country(&ctx, &state.store).await,
        Endpoint::GetCountries => countries::get_countries(&ctx, &state.store).await,
        Endpoint::GetAllCountries => countries::get_all_countries(&ctx, &state.store).await,
        Endpoint::GetRegion => countries::get_region(&ctx, &state.store).await,
        Endpoint::GetFavorites => countries::get_favorites(&ctx, &state.store).await,
        Endpoint::AddCountry | Endpoint::AddReview | Endpoint::AddFavorite => {
            let content_type = header_string(&req, "content-type");
            let payload = match body::decode(content_type.as_deref(), req.into_body()).await {
                Ok(value) => value,
                Err(e) => return http::error_response(&e, false),
            };
            match endpoint {
                Endpoint::AddCountry => mutations::add_country(&payload, &state.store).await,
                Endpoint::AddReview => mutations::add_review(&payload, &state.store).await,
                _ => mutations::add_favorite(&payload, &state.store).await,
            }
        }
    }
}

fn header_string(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Validate the Content-Length header and return 413 if it exceeds the limit
fn check_body_size(req: &Request<Incoming>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_filters_empty_values() {
        let ctx = RequestContext {
            query: query::parse_pairs("name=&region=Europe"),
            is_head: false,
            if_none_match: None,
        };
        assert_eq!(ctx.param("name"), None);
        assert_eq!(ctx.param("region"), Some("Europe"));
        assert_eq!(ctx.param("absent"), None);
    }
}

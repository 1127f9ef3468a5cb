//! Static asset endpoints
//!
//! The landing page and stylesheet are read once at startup and served from
//! memory with `ETag`/`If-None-Match` support. Missing files fall back to
//! the embedded defaults so the service still comes up on a bare checkout.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::RequestContext;
use crate::http;
use crate::logger;

const DEFAULT_INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Country API</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <main>
        <h1>Country API</h1>
        <p>An in-memory dataset of countries with lookup, filtering, reviews and favorites.</p>
        <ul>
            <li><code>GET /getCountry?name=Canada</code></li>
            <li><code>GET /getCountries?latmin=0&amp;latmax=10&amp;longmin=0&amp;longmax=10</code></li>
            <li><code>GET /getAllCountries</code></li>
            <li><code>GET /getRegion?region=Europe</code></li>
            <li><code>GET /getFavorites</code></li>
            <li><code>POST /addCountry</code></li>
            <li><code>POST /addReview</code></li>
            <li><code>POST /addFavorite</code></li>
        </ul>
    </main>
</body>
</html>
"#;

const DEFAULT_STYLESHEET: &str = r"body {
    font-family: -apple-system, 'Segoe UI', Roboto, sans-serif;
    margin: 0;
    background: #f4f4f7;
    color: #222;
}
main {
    max-width: 640px;
    margin: 48px auto;
    padding: 24px 32px;
    background: #fff;
    border-radius: 8px;
    box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12);
}
code {
    background: #eef;
    padding: 1px 5px;
    border-radius: 3px;
}
";

/// Landing page and stylesheet held in memory for the process lifetime
pub struct StaticAssets {
    index: Bytes,
    index_etag: String,
    stylesheet: Bytes,
    stylesheet_etag: String,
}

impl StaticAssets {
    /// Read both assets from `assets_dir`, falling back to the embedded
    /// defaults when a file is absent.
    pub fn load(assets_dir: &str) -> Self {
        let index = read_or_default(assets_dir, "index.html", DEFAULT_INDEX);
        let stylesheet = read_or_default(assets_dir, "style.css", DEFAULT_STYLESHEET);
        Self {
            index_etag: generate_etag(&index),
            index,
            stylesheet_etag: generate_etag(&stylesheet),
            stylesheet,
        }
    }
}

/// GET /
pub fn serve_index(ctx: &RequestContext, assets: &StaticAssets) -> Response<Full<Bytes>> {
    serve(
        ctx,
        assets.index.clone(),
        &assets.index_etag,
        "text/html; charset=utf-8",
    )
}

/// GET /style.css
pub fn serve_stylesheet(ctx: &RequestContext, assets: &StaticAssets) -> Response<Full<Bytes>> {
    serve(
        ctx,
        assets.stylesheet.clone(),
        &assets.stylesheet_etag,
        "text/css",
    )
}

fn serve(
    ctx: &RequestContext,
    data: Bytes,
    etag: &str,
    content_type: &str,
) -> Response<Full<Bytes>> {
    if etag_matches(ctx.if_none_match.as_deref(), etag) {
        return http::build_304_response(etag);
    }
    http::build_asset_response(data, content_type, etag, ctx.is_head)
}

fn read_or_default(assets_dir: &str, file: &str, fallback: &str) -> Bytes {
    let path = Path::new(assets_dir).join(file);
    match std::fs::read(&path) {
        Ok(content) => Bytes::from(content),
        Err(e) => {
            logger::log_warning(&format!(
                "Asset '{}' not readable ({e}), using embedded default",
                path.display()
            ));
            Bytes::from(fallback.to_string())
        }
    }
}

fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// `If-None-Match` may carry several comma-separated values or `*`.
fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}

//! Stand-in for the VAST REST API.
//!
//! Each route exercises one part of the client contract: a fixed body,
//! echoing the request body, method or headers back, arbitrary status codes,
//! bodies of a requested size, and bodies that are not valid UTF-8.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use tokio::net::TcpListener;

/// Bytes served by `/invalid-utf8`: `ok`, a lone continuation byte, `ok`.
pub const INVALID_UTF8_BODY: &[u8] = b"ok\x80ok";

pub fn app() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/echo", any(echo))
        .route("/method", any(method))
        .route("/headers", any(headers))
        .route("/status/{code}", any(status))
        .route("/bytes/{len}", get(bytes))
        .route("/invalid-utf8", get(invalid_utf8))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> &'static str {
    "pong"
}

async fn echo(body: Bytes) -> Bytes {
    body
}

async fn method(method: Method) -> String {
    method.to_string()
}

/// Every received header, grouped by lowercase name.
async fn headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers.iter() {
        seen.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(seen)
}

/// Any status with a VAST-style JSON error body, so callers can check that
/// 4xx/5xx payloads pass through untouched.
async fn status(Path(code): Path<u16>) -> (StatusCode, String) {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!(r#"{{"detail":"status {code}"}}"#)),
        Err(_) => (StatusCode::BAD_REQUEST, format!(r#"{{"detail":"invalid status {code}"}}"#)),
    }
}

/// `len` bytes cycling through `a`..=`z`.
async fn bytes(Path(len): Path<usize>) -> Vec<u8> {
    (b'a'..=b'z').cycle().take(len).collect()
}

async fn invalid_utf8() -> &'static [u8] {
    INVALID_UTF8_BODY
}

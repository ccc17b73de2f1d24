use std::collections::BTreeMap;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, INVALID_UTF8_BODY};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- utility routes ---

#[tokio::test]
async fn ping_returns_pong() {
    let resp = app().oneshot(empty_request("GET", "/ping")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "pong");
}

#[tokio::test]
async fn echo_returns_body_verbatim() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"a":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, r#"{"a":1}"#);
}

#[tokio::test]
async fn echo_accepts_put() {
    let resp = app()
        .oneshot(json_request("PUT", "/echo", "payload"))
        .await
        .unwrap();
    assert_eq!(body_bytes(resp).await, "payload");
}

#[tokio::test]
async fn method_reports_request_method() {
    for verb in ["GET", "POST", "PUT", "DELETE"] {
        let resp = app().oneshot(empty_request(verb, "/method")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, verb);
    }
}

#[tokio::test]
async fn headers_lists_every_value() {
    let req = Request::builder()
        .uri("/headers")
        .header("x-one", "1")
        .header("x-multi", "a")
        .header("x-multi", "b")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let seen: BTreeMap<String, Vec<String>> = body_json(resp).await;
    assert_eq!(seen["x-one"], vec!["1".to_string()]);
    assert_eq!(seen["x-multi"], vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn status_route_sets_status_and_body() {
    let resp = app().oneshot(empty_request("GET", "/status/503")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_bytes(resp).await, r#"{"detail":"status 503"}"#);
}

#[tokio::test]
async fn status_route_rejects_out_of_range_code() {
    let resp = app().oneshot(empty_request("GET", "/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bytes_returns_requested_length() {
    let resp = app().oneshot(empty_request("GET", "/bytes/100000")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 100_000);
    assert_eq!(&body[..3], b"abc");
}

#[tokio::test]
async fn bytes_zero_is_empty() {
    let resp = app().oneshot(empty_request("GET", "/bytes/0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn invalid_utf8_is_served_raw() {
    let resp = app().oneshot(empty_request("GET", "/invalid-utf8")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], INVALID_UTF8_BODY);
}

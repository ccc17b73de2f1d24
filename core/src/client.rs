//! Blocking client for the VAST REST API.
//!
//! # Design
//! `VastClient` holds only `base_url` and `token`, both fixed at
//! construction. Each verb resolves its arguments into an `HttpRequest`
//! (`build_request`) and hands it to the transport, which opens a fresh
//! session, performs one exchange and returns the body. Nothing is shared
//! between calls, so a client can be used from several threads at once.

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::http::{Headers, HttpMethod, HttpRequest};
use crate::transport;

/// Synchronous, stateless client for the VAST REST API.
#[derive(Clone)]
pub struct VastClient {
    base_url: String,
    token: String,
}

impl VastClient {
    /// `base_url` is used verbatim: endpoints are appended with no
    /// separator inserted or removed.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, &config.token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn get(&self, endpoint: &str, headers: &Headers) -> Result<String, RequestError> {
        self.request(HttpMethod::Get, endpoint, "", headers)
    }

    pub fn post(&self, endpoint: &str, body: &str, headers: &Headers) -> Result<String, RequestError> {
        self.request(HttpMethod::Post, endpoint, body, headers)
    }

    pub fn put(&self, endpoint: &str, body: &str, headers: &Headers) -> Result<String, RequestError> {
        self.request(HttpMethod::Put, endpoint, body, headers)
    }

    pub fn delete(&self, endpoint: &str, headers: &Headers) -> Result<String, RequestError> {
        self.request(HttpMethod::Delete, endpoint, "", headers)
    }

    /// Resolve a call into the request that would be sent.
    ///
    /// An empty `body` means no body. When the client has a token and the
    /// caller did not pass an `Authorization` header, a bearer header is
    /// appended after the caller's headers.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &str,
        headers: &Headers,
    ) -> HttpRequest {
        let mut pairs: Vec<(String, String)> = headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let has_auth = headers.keys().any(|k| k.eq_ignore_ascii_case("authorization"));
        if !self.token.is_empty() && !has_auth {
            pairs.push(("Authorization".to_string(), format!("Bearer {}", self.token)));
        }

        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            headers: pairs,
            body: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<String, RequestError> {
        let req = self.build_request(method, endpoint, body, headers);
        transport::execute(&req)
    }
}

impl std::fmt::Debug for VastClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VastClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VastClient {
        VastClient::new("https://api.example.com", "")
    }

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn url_is_plain_concatenation() {
        let req = client().build_request(HttpMethod::Get, "/ping", "", &Headers::new());
        assert_eq!(req.url, "https://api.example.com/ping");
    }

    #[test]
    fn no_separator_is_inserted() {
        let req = client().build_request(HttpMethod::Get, "ping", "", &Headers::new());
        assert_eq!(req.url, "https://api.example.comping");
    }

    #[test]
    fn trailing_slash_is_kept() {
        let client = VastClient::new("https://api.example.com/", "");
        let req = client.build_request(HttpMethod::Get, "/ping", "", &Headers::new());
        assert_eq!(req.url, "https://api.example.com//ping");
    }

    #[test]
    fn get_request_has_no_body() {
        let req = client().build_request(HttpMethod::Get, "/api/quotas/", "", &Headers::new());
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn post_attaches_body_verbatim() {
        let req = client().build_request(HttpMethod::Post, "/items", "{\"a\":1}", &Headers::new());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn put_with_empty_body_attaches_nothing() {
        let req = client().build_request(HttpMethod::Put, "/items/1", "", &Headers::new());
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.body.is_none());
    }

    #[test]
    fn whitespace_body_is_still_a_body() {
        let req = client().build_request(HttpMethod::Put, "/items/1", " ", &Headers::new());
        assert_eq!(req.body.as_deref(), Some(" "));
    }

    #[test]
    fn every_header_appears_once() {
        let hdrs = headers(&[("Accept", "application/json"), ("X-Request-Id", "42")]);
        let req = client().build_request(HttpMethod::Get, "/ping", "", &hdrs);
        let lines = req.header_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.iter().filter(|l| *l == "Accept: application/json").count(), 1);
        assert_eq!(lines.iter().filter(|l| *l == "X-Request-Id: 42").count(), 1);
    }

    #[test]
    fn token_becomes_bearer_header() {
        let client = VastClient::new("https://api.example.com", "abc123");
        let req = client.build_request(HttpMethod::Get, "/ping", "", &Headers::new());
        assert_eq!(req.header_lines(), vec!["Authorization: Bearer abc123".to_string()]);
    }

    #[test]
    fn caller_authorization_wins_over_token() {
        let client = VastClient::new("https://api.example.com", "abc123");
        let hdrs = headers(&[("authorization", "Basic dXNlcjpwdw==")]);
        let req = client.build_request(HttpMethod::Get, "/ping", "", &hdrs);
        assert_eq!(req.header_lines(), vec!["authorization: Basic dXNlcjpwdw==".to_string()]);
    }

    #[test]
    fn empty_token_adds_no_header() {
        let req = client().build_request(HttpMethod::Delete, "/api/quotas/1/", "", &Headers::new());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn accessors_return_construction_values() {
        let client = VastClient::new("http://localhost:3000", "tok");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.token(), "tok");
    }

    #[test]
    fn from_config_copies_fields() {
        let config = ClientConfig {
            base_url: "http://localhost:3000".to_string(),
            token: "tok".to_string(),
        };
        let client = VastClient::from_config(&config);
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.token(), "tok");
    }

    #[test]
    fn debug_hides_token() {
        let client = VastClient::new("http://localhost:3000", "secret");
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[test]
    fn malformed_base_url_fails_init() {
        let client = VastClient::new("api.example.com", "");
        let err = client.get("/ping", &Headers::new()).unwrap_err();
        assert!(matches!(err, RequestError::TransportInit(_)));
    }

    #[test]
    fn bad_header_fails_init() {
        let hdrs = headers(&[("X-Bad", "line\nbreak")]);
        let err = client().post("/items", "{}", &hdrs).unwrap_err();
        assert!(matches!(err, RequestError::TransportInit(_)));
    }
}

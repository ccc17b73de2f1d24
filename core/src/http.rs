//! Plain-data description of an outgoing request.
//!
//! # Design
//! `VastClient` turns a method, endpoint, body and header map into an
//! `HttpRequest` before anything touches the network. Keeping the request as
//! owned data makes the URL, header and body rules checkable without a
//! server, and lets the C ABI hand the same values across without lifetimes.

use std::collections::BTreeMap;
use std::fmt;

/// Per-call header mapping. Keys are unique; iteration order carries no
/// meaning on the wire.
pub type Headers = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request: absolute URL, explicit method, the headers to
/// send and the body, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Headers rendered the way they appear on the wire, one `key: value`
    /// line per entry.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect()
    }
}

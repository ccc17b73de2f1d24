//! Executes an `HttpRequest` over the network with `ureq`.
//!
//! Every call builds its own `Agent` and drops it on return, so no
//! connection outlives the request that opened it. The agent is configured
//! to hand back 4xx/5xx responses as data instead of `Err`.

use tracing::{debug, warn};
use ureq::http::{HeaderName, HeaderValue, Response, Uri};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest};

/// Perform one blocking exchange and return the response body as text.
pub(crate) fn execute(req: &HttpRequest) -> Result<String, RequestError> {
    validate(req)?;
    let agent = new_session();

    debug!(
        method = %req.method,
        url = %req.url,
        headers = req.headers.len(),
        body_len = req.body.as_ref().map_or(0, String::len),
        "dispatching request"
    );

    let mut response = dispatch(&agent, req).map_err(|e| transport_error(req, e))?;
    let status = response.status().as_u16();
    // ureq caps reads at 10 MiB by default; the sink takes the whole body.
    let bytes = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()
        .map_err(|e| transport_error(req, e))?;

    debug!(status, bytes = bytes.len(), url = %req.url, "response received");
    Ok(decode_body(bytes))
}

/// Valid UTF-8 is returned unchanged; invalid sequences become U+FFFD.
fn decode_body(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn new_session() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn dispatch(agent: &Agent, req: &HttpRequest) -> Result<Response<Body>, ureq::Error> {
    let url = req.url.as_str();
    match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), &req.headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(url), &req.headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(url), &req.headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(url), &req.headers).send_empty(),
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn transport_error(req: &HttpRequest, err: ureq::Error) -> RequestError {
    warn!(method = %req.method, url = %req.url, error = %err, "request failed");
    RequestError::Transport(err.to_string())
}

/// Reject anything the transport could not even start with, before a
/// socket is opened.
fn validate(req: &HttpRequest) -> Result<(), RequestError> {
    let uri = req
        .url
        .parse::<Uri>()
        .map_err(|e| RequestError::TransportInit(format!("invalid url {:?}: {e}", req.url)))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => {
            return Err(RequestError::TransportInit(format!(
                "unsupported scheme {other:?} in {:?}",
                req.url
            )))
        }
        None => {
            return Err(RequestError::TransportInit(format!(
                "missing scheme in {:?}",
                req.url
            )))
        }
    }
    if uri.host().map_or(true, str::is_empty) {
        return Err(RequestError::TransportInit(format!(
            "missing host in {:?}",
            req.url
        )));
    }

    for (key, value) in &req.headers {
        HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| RequestError::TransportInit(format!("invalid header name {key:?}: {e}")))?;
        HeaderValue::from_str(value)
            .map_err(|e| RequestError::TransportInit(format!("invalid value for header {key:?}: {e}")))?;
    }
    Ok(())
}

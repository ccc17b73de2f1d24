//! Blocking client for the VAST Data REST API.
//!
//! # Overview
//! `VastClient` exposes `get`, `post`, `put` and `delete`. Each call appends
//! the endpoint to the base URL, attaches the caller's headers and optional
//! body, performs one blocking exchange and returns the response body as a
//! string, whatever the HTTP status.
//!
//! # Design
//! - `VastClient` is stateless beyond `base_url` and `token`.
//! - Requests are resolved into plain `HttpRequest` data first, then handed
//!   to the transport, so request shaping is testable without a network.
//! - Each call owns its own transport session; dropping it releases the
//!   connection on every exit path.
//! - Failures are `RequestError::TransportInit` (nothing was sent) or
//!   `RequestError::Transport` (the exchange broke).

pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod transport;

pub use client::VastClient;
pub use config::{ClientConfig, ConfigError};
pub use error::RequestError;
pub use http::{Headers, HttpMethod, HttpRequest};

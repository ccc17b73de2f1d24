//! Error type for `VastClient` requests.
//!
//! # Design
//! Only two things can go wrong: the transport could not be set up for the
//! request, or the exchange itself failed. HTTP error statuses are not
//! errors here; the body of a 4xx/5xx response is returned like any other.

use thiserror::Error;

/// Errors returned by `VastClient` request methods.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The session or request could not be initialized. No network I/O
    /// took place.
    #[error("failed to initialize transport: {0}")]
    TransportInit(String),

    /// The network exchange failed. Carries the transport's own message.
    #[error("{0}")]
    Transport(String),
}

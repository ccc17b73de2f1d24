//! Environment-driven client configuration.

use std::env;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "VAST_BASE_URL";
pub const TOKEN_VAR: &str = "VAST_TOKEN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Connection settings for a `VastClient`.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
}

impl ClientConfig {
    /// Read `VAST_BASE_URL` (required) and `VAST_TOKEN` (optional) from the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let token = lookup(TOKEN_VAR).unwrap_or_default();
        Ok(Self { base_url, token })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

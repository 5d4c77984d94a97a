//! Client config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `SEARCH_API_URL`          = API base URL (optional, default `http://localhost:5200`)
//! - `SEARCH_API_TIMEOUT_SECS` = request timeout in seconds (optional, unset = no timeout)

use tracing::debug;

use crate::{
    config::client_config::{ClientConfig, DEFAULT_BASE_URL},
    error_handler::{ConfigError, env_opt, env_opt_u64, validate_http_endpoint},
};

pub const ENV_BASE_URL: &str = "SEARCH_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SEARCH_API_TIMEOUT_SECS";

/// Builds a [`ClientConfig`] from the environment.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `SEARCH_API_URL` lacks an http(s) scheme
/// - [`ConfigError::InvalidNumber`] if `SEARCH_API_TIMEOUT_SECS` is not a u64
pub fn config_from_env() -> Result<ClientConfig, ConfigError> {
    let base_url = env_opt(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_http_endpoint(ENV_BASE_URL, &base_url)?;
    let timeout_secs = env_opt_u64(ENV_TIMEOUT_SECS)?;

    debug!(base_url = %base_url, ?timeout_secs, "client config resolved from env");

    Ok(ClientConfig::new(base_url).with_timeout_secs(timeout_secs))
}

impl ClientConfig {
    /// Same as [`config_from_env`].
    pub fn from_env() -> Result<ClientConfig, ConfigError> {
        config_from_env()
    }
}

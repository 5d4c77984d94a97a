//! Unified error handling for `search-api-client`.
//!
//! Transport failures of the three REST calls are reported through a single
//! [`SearchApiError`] with exactly three kinds, so callers can branch
//! exhaustively via [`SearchApiError::kind`]. Setup-time problems (env
//! parsing, HTTP client construction) live in [`SetupError`], and pre-submit
//! request checks in [`RequestValidationError`]; neither is ever produced by
//! a network call.
//!
//! All messages include the prefix `[Search API]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result aliases                                                     */
/* ------------------------------------------------------------------------- */

/// Result alias for transport calls ([`crate::SearchApiClient`] operations).
pub type Result<T> = std::result::Result<T, SearchApiError>;

/// Result alias for configuration and client construction.
pub type SetupResult<T> = std::result::Result<T, SetupError>;

/* ------------------------------------------------------------------------- */
/* Transport errors                                                          */
/* ------------------------------------------------------------------------- */

/// Discriminant of [`SearchApiError`], convenient for `match` without
/// destructuring the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkUnavailable,
    RequestFailed,
    MalformedResponse,
}

/// Error returned by every call of the search API client.
#[derive(Debug, Error)]
pub enum SearchApiError {
    /// The request never reached the server (DNS, connection refused,
    /// transport timeout, broken body stream). Carries no status.
    #[error("[Search API] network error: unable to reach {url}: {source}")]
    NetworkUnavailable {
        /// Request URL.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success HTTP status.
    #[error("[Search API] request failed with HTTP {status}: {message}")]
    RequestFailed {
        /// HTTP status returned by the server.
        status: StatusCode,
        /// Response body text for `search`, a fixed description otherwise.
        message: String,
    },

    /// The server answered 2xx but the body does not have the expected shape.
    #[error("[Search API] malformed response from {url}: {reason}")]
    MalformedResponse {
        /// Request URL.
        url: String,
        /// Decoder message.
        reason: String,
    },
}

impl SearchApiError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchApiError::NetworkUnavailable { .. } => ErrorKind::NetworkUnavailable,
            SearchApiError::RequestFailed { .. } => ErrorKind::RequestFailed,
            SearchApiError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    /// HTTP status, present only for [`SearchApiError::RequestFailed`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SearchApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message without the log prefix.
    ///
    /// For `RequestFailed` this is exactly the server-provided text (or the
    /// `HTTP {status}` fallback), suitable for showing verbatim.
    pub fn message(&self) -> String {
        match self {
            SearchApiError::NetworkUnavailable { url, .. } => {
                format!("Network error: unable to connect to API server at {url}")
            }
            SearchApiError::RequestFailed { message, .. } => message.clone(),
            SearchApiError::MalformedResponse { reason, .. } => reason.clone(),
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Setup errors                                                              */
/* ------------------------------------------------------------------------- */

/// Errors raised while building a client, never by a request.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration/validation errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying HTTP client could not be built (TLS backend etc.).
    #[error("[Search API] failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (like timeouts).
    #[error("[Search API] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `SEARCH_API_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[Search API] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `SEARCH_API_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Request validation errors                                                 */
/* ------------------------------------------------------------------------- */

/// Pre-submit checks of a [`crate::models::SearchRequest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    #[error("search text must not be empty")]
    EmptyText,

    #[error("collection name must not be empty")]
    EmptyCollection,

    #[error("top_k must be a positive integer, got {0}")]
    InvalidTopK(u32),

    #[error("threshold must be within 0.0..=1.0, got {0}")]
    ThresholdOutOfRange(f32),
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Reads an env variable, treating unset and blank values alike (`None`).
pub fn env_opt(name: &'static str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u64`.
pub fn env_opt_u64(name: &'static str) -> std::result::Result<Option<u64>, ConfigError> {
    match env_opt(name) {
        Some(v) => v.parse::<u64>().map(Some).map_err(|_| ConfigError::InvalidNumber {
            var: name,
            reason: "expected u64",
        }),
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start
/// with a valid HTTP scheme.
pub fn validate_http_endpoint(
    var: &'static str,
    value: &str,
) -> std::result::Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_exposes_status_and_message() {
        let err = SearchApiError::RequestFailed {
            status: StatusCode::NOT_FOUND,
            message: "HTTP 404".into(),
        };
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.message(), "HTTP 404");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn malformed_response_has_no_status() {
        let err = SearchApiError::MalformedResponse {
            url: "http://x/health".into(),
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn endpoint_scheme_check() {
        assert!(validate_http_endpoint("SEARCH_API_URL", "http://localhost:5200").is_ok());
        assert!(validate_http_endpoint("SEARCH_API_URL", "https://api").is_ok());
        assert!(matches!(
            validate_http_endpoint("SEARCH_API_URL", "localhost:5200"),
            Err(ConfigError::InvalidFormat { var: "SEARCH_API_URL", .. })
        ));
    }
}

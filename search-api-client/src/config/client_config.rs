use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5200";

/// Connection settings of a [`crate::SearchApiClient`].
///
/// Each client owns its own config, so several clients pointed at different
/// servers can live in one process.
///
/// # Fields
///
/// - `base_url`: API root, stored with one trailing `/` stripped.
/// - `timeout_secs`: optional whole-request timeout. `None` leaves timing to
///   the transport (no client-side limit).
///
/// # Examples
///
/// ```
/// use search_api_client::config::client_config::ClientConfig;
///
/// let cfg = ClientConfig::new("http://localhost:5200/").with_timeout_secs(Some(30));
/// assert_eq!(cfg.base_url(), "http://localhost:5200");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Creates a config for `base_url` with no timeout.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Current base URL (already normalized).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replaces the base URL; affects every later request made with this config.
    pub fn set_base_url(&mut self, url: impl AsRef<str>) {
        self.base_url = normalize_base_url(url.as_ref());
    }

    /// Timeout as a [`Duration`], if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Joins the base URL with an absolute endpoint path such as `/health`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Strips exactly one trailing `/`, leaving everything else untouched.
pub fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_once() {
        assert_eq!(normalize_base_url("http://x/"), "http://x");
        assert_eq!(normalize_base_url("http://x"), "http://x");
        assert_eq!(normalize_base_url("http://x//"), "http://x/");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn set_base_url_normalizes_and_is_idempotent() {
        let mut cfg = ClientConfig::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);

        cfg.set_base_url("http://x/");
        assert_eq!(cfg.base_url(), "http://x");

        cfg.set_base_url("http://x");
        assert_eq!(cfg.base_url(), "http://x");
        assert_eq!(cfg.endpoint("/search"), "http://x/search");
    }

    #[test]
    fn no_timeout_by_default() {
        let cfg = ClientConfig::new("http://x");
        assert_eq!(cfg.timeout(), None);
        let cfg = cfg.with_timeout_secs(Some(5));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));
    }
}

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default NowCerts environment.
pub const DEFAULT_BASE_URL: &str = "https://test-null-ref-express.nowcerts.com";

/// Default per-request timeout in seconds.
///
/// Kept under the 5 second tool-call timeout of the calling agent.
pub const DEFAULT_TIMEOUT_SECS: u64 = 4;

/// Configuration for the upstream NowCerts API.
///
/// # Security
///
/// The `api_key` field uses `SecretString` to prevent accidental logging or
/// display of the credential.
///
/// # Examples
///
/// ```
/// use nowcerts_common::ApiConfig;
///
/// let config = ApiConfig::new("amp_ai_key")
///     .with_base_url("http://localhost:8080")
///     .with_timeout_seconds(2);
///
/// assert_eq!(config.timeout().as_secs(), 2);
/// assert!(!format!("{config:?}").contains("amp_ai_key"));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing path.
    pub base_url: String,
    /// Static API key exchanged for bearer tokens.
    pub api_key: SecretString,
    /// Timeout applied to every outbound request.
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Creates a configuration for the default environment.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(SecretString::new(api_key.into().into()))
    }

    /// Creates a configuration from an already wrapped secret.
    #[must_use]
    pub fn from_secret(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// Any path already present on the base URL is kept, so a base of
    /// `http://host/prefix` and a path of `api/x` yields `http://host/prefix/api/x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)?.join(path.trim_start_matches('/'))
    }
}

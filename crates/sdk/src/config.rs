//! Configuration types for the Folo SDK.

use crate::error::FoloResult;
use url::Url;

/// Origin of the Folo API.
pub const DEFAULT_BASE_URL: &str = "https://api.follow.is";

/// Environment variable holding the Folo session token.
pub const SESSION_TOKEN_ENV: &str = "FOLO_SESSION_TOKEN";

/// Cookie the Folo API reads the session token from.
pub const SESSION_COOKIE_NAME: &str = "__Secure-better-auth.session_token";

/// Browser user agent sent with every upstream request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// Configuration for the Folo client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Origin that tool paths are appended to.
    pub base_url: Url,
    /// Session token; `None` makes every query soft-fail.
    pub session_token: Option<String>,
    /// User agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the given origin with no session token.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            session_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Configuration for the public Folo API, token taken from `FOLO_SESSION_TOKEN`.
    pub fn from_env() -> FoloResult<Self> {
        let mut config = Self::new(Url::parse(DEFAULT_BASE_URL)?);
        config.session_token = std::env::var(SESSION_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty());
        Ok(config)
    }

    /// Set the session token.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_new() {
        let url = Url::parse("https://example.com").unwrap();
        let config = ClientConfig::new(url.clone());

        assert_eq!(config.base_url, url);
        assert!(config.session_token.is_none());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_with_session_token() {
        let config = ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap())
            .with_session_token("tok");

        assert_eq!(config.session_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap())
            .with_session_token("super-secret");

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}

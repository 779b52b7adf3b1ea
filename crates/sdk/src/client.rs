//! Main client for the Folo SDK.

use crate::config::{ClientConfig, DEFAULT_USER_AGENT, SESSION_TOKEN_ENV};
use crate::error::{FoloError, FoloResult};
use crate::transport::HttpTransport;
use folo_core::ApiRoute;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Text returned in place of data when no session token is configured.
pub const MISSING_TOKEN_MESSAGE: &str = "Without session token, I cannot access the data. Please provide it in the environment variable FOLO_SESSION_TOKEN.";

/// Normalized outcome of a single forwarded query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// No session token was configured; nothing was sent upstream.
    MissingSessionToken,
    /// The API returned a non-empty `data` field.
    Data(Value),
    /// The API succeeded without returning anything worth showing.
    Success,
}

impl QueryOutcome {
    /// Text shown to the calling agent.
    pub fn into_text(self) -> FoloResult<String> {
        match self {
            Self::MissingSessionToken => Ok(MISSING_TOKEN_MESSAGE.to_string()),
            Self::Data(data) => Ok(serde_json::to_string_pretty(&data)?),
            Self::Success => Ok("Success".to_string()),
        }
    }

    fn from_data(data: Option<Value>) -> Self {
        match data {
            Some(data) if is_truthy(&data) => Self::Data(data),
            _ => Self::Success,
        }
    }
}

// Empty strings, zero, false and null count as "no data"; empty arrays and
// objects are still returned.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Client that forwards tool calls to the Folo API.
#[derive(Debug, Clone)]
pub struct FoloClient {
    config: Arc<ClientConfig>,
    http: HttpTransport,
}

impl FoloClient {
    /// Create a new client builder.
    pub fn builder() -> FoloClientBuilder {
        FoloClientBuilder::new()
    }

    /// Client for the public Folo API using `FOLO_SESSION_TOKEN`.
    pub fn from_env() -> FoloResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> FoloResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Whether a session token is configured.
    pub fn has_session_token(&self) -> bool {
        self.config.session_token.is_some()
    }

    /// Forward one query to `route`.
    ///
    /// A missing session token is not an error: the outcome is
    /// [`QueryOutcome::MissingSessionToken`] and nothing is sent.
    pub async fn forward(
        &self,
        route: ApiRoute,
        args: &Map<String, Value>,
    ) -> FoloResult<QueryOutcome> {
        debug!(route = %route, args = %serde_json::Value::Object(args.clone()), "Forwarding query");

        let Some(token) = self.config.session_token.as_deref() else {
            error!("Session token not found in {}", SESSION_TOKEN_ENV);
            return Ok(QueryOutcome::MissingSessionToken);
        };

        let response = self.http.execute(route, args, token).await?;
        debug!(route = %route, "Query completed successfully");

        Ok(QueryOutcome::from_data(response.data))
    }
}

/// Builder for creating a FoloClient.
pub struct FoloClientBuilder {
    base_url: Option<String>,
    session_token: Option<String>,
    user_agent: String,
}

impl FoloClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            session_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the API origin. Defaults to the public Folo API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the session token.
    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Override the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> FoloResult<FoloClient> {
        let base_url = match self.base_url {
            Some(url) => Url::parse(&url)?,
            None => Url::parse(crate::config::DEFAULT_BASE_URL)?,
        };

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(FoloError::Config(format!(
                "Unsupported base URL scheme: {}",
                base_url.scheme()
            )));
        }

        let config = ClientConfig {
            base_url,
            session_token: self.session_token.filter(|token| !token.is_empty()),
            user_agent: self.user_agent,
        };

        FoloClient::from_config(config)
    }
}

impl Default for FoloClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

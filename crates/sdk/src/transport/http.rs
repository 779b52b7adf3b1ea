//! HTTP transport layer for the Folo SDK.

use crate::config::{ClientConfig, SESSION_COOKIE_NAME};
use crate::error::{FoloError, FoloResult};
use crate::transport::query::query_pairs;
use folo_core::{ApiRoute, HttpMethod};
use reqwest::{header, Client, Request};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Successful upstream payload, `data` already unwrapped from the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub data: Option<Value>,
}

/// HTTP transport for making Folo API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> FoloResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Origin followed by the route path, plus the query string for GET.
    pub(crate) fn build_url(&self, route: ApiRoute, args: &Map<String, Value>) -> FoloResult<url::Url> {
        let origin = self.config.base_url.as_str().trim_end_matches('/');
        let mut url = url::Url::parse(&format!("{}{}", origin, route.path))?;

        if route.method == HttpMethod::Get {
            let pairs = query_pairs(args);
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        Ok(url)
    }

    /// Build the outbound request for `route` authenticated with `session_token`.
    pub fn build_request(
        &self,
        route: ApiRoute,
        args: &Map<String, Value>,
        session_token: &str,
    ) -> FoloResult<Request> {
        let url = self.build_url(route, args)?;
        let cookie = header::HeaderValue::from_str(&format!(
            "{}={};",
            SESSION_COOKIE_NAME, session_token
        ))
        .map_err(|_| FoloError::Config("Invalid session token format".to_string()))?;

        let builder = match route.method {
            HttpMethod::Get => self.client.get(url),
            // `json` also sets `content-type: application/json`
            HttpMethod::Post => self.client.post(url).json(args),
        };

        Ok(builder.header(header::COOKIE, cookie).build()?)
    }

    /// Send a request and unwrap the `{code, message, data}` envelope.
    pub async fn execute(
        &self,
        route: ApiRoute,
        args: &Map<String, Value>,
        session_token: &str,
    ) -> FoloResult<ApiResponse> {
        let request = self.build_request(route, args, session_token)?;
        debug!(method = %route.method, url = %request.url(), "Sending Folo API request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Folo API responded");

        let body = response.bytes().await?;
        let envelope: Value = serde_json::from_slice(&body)?;
        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope(mut envelope: Value) -> FoloResult<ApiResponse> {
    let code = envelope.get("code").cloned();
    let succeeded = code.as_ref().and_then(Value::as_f64) == Some(0.0);

    if !succeeded {
        let message = match envelope.get("message") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        warn!(code = ?code, message = ?message, "Folo API returned an error");
        return Err(FoloError::Upstream {
            code: code.as_ref().and_then(Value::as_i64),
            message,
        });
    }

    let data = envelope.get_mut("data").map(Value::take);
    Ok(ApiResponse { data })
}

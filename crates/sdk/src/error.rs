//! Error types for the Folo SDK.

/// Result type for SDK operations.
pub type FoloResult<T> = Result<T, FoloError>;

/// Error types that can occur when querying the Folo API.
#[derive(Debug, thiserror::Error)]
pub enum FoloError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-zero `code`.
    #[error("Error: {}", message.as_deref().unwrap_or("unknown error"))]
    Upstream {
        code: Option<i64>,
        message: Option<String>,
    },

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FoloError {
    /// Whether the failure was reported by the Folo API itself.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message() {
        let err = FoloError::Upstream {
            code: Some(1),
            message: Some("bad request".to_string()),
        };
        assert_eq!(err.to_string(), "Error: bad request");
        assert!(err.is_upstream());
    }

    #[test]
    fn test_upstream_without_message() {
        let err = FoloError::Upstream {
            code: None,
            message: None,
        };
        assert_eq!(err.to_string(), "Error: unknown error");
    }
}

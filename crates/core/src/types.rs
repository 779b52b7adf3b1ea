use serde::{Deserialize, Serialize};

/// HTTP verb used for an upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream endpoint a tool forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiRoute {
    pub path: &'static str,
    pub method: HttpMethod,
}

impl ApiRoute {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: HttpMethod::Get,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: HttpMethod::Post,
        }
    }
}

impl std::fmt::Display for ApiRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Transport binding the protocol server is exposed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportKind {
    /// Newline-delimited JSON over stdin/stdout
    #[default]
    Stdio,
    /// Server-Sent Events plus POST-back over HTTP
    Http,
}

impl TransportKind {
    /// Anything other than `http` selects stdio.
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "http" => Self::Http,
            _ => Self::Stdio,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

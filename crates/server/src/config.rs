use clap::Parser;
use folo_core::TransportKind;
use std::net::SocketAddr;
use thiserror::Error;

/// Path of the SSE endpoint clients open sessions on
pub const SSE_PATH: &str = "/sse";

#[derive(Parser, Debug, Clone)]
#[command(name = "folo-mcp")]
#[command(about = "MCP server exposing the Folo feed reader API as tools", long_about = None)]
pub struct Args {
    /// Transport to serve on: stdio or http (anything else means stdio)
    #[arg(short, long, default_value = "stdio")]
    pub transport: String,

    /// Port to listen on with the http transport
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Path clients POST messages to with the http transport
    #[arg(short, long, default_value = "/message")]
    pub endpoint: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Message endpoint must start with '/': {0}")]
    EndpointNotAbsolute(String),

    #[error("Message endpoint cannot be /sse")]
    EndpointConflictsWithSse,

    #[error("Message endpoint contains reserved character '{character}': {endpoint}")]
    EndpointReservedCharacter { endpoint: String, character: char },

    #[error("Message endpoint segments cannot start with ':' or '*': {0}")]
    EndpointCaptureSegment(String),
}

/// Characters that would turn the endpoint into a route capture or corrupt
/// the `endpoint` event URL
const RESERVED_ENDPOINT_CHARS: [char; 4] = ['{', '}', '?', '#'];

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    if !endpoint.starts_with('/') {
        return Err(ConfigError::EndpointNotAbsolute(endpoint.to_string()));
    }
    if endpoint == SSE_PATH {
        return Err(ConfigError::EndpointConflictsWithSse);
    }
    if let Some(character) = endpoint.chars().find(|c| RESERVED_ENDPOINT_CHARS.contains(c)) {
        return Err(ConfigError::EndpointReservedCharacter {
            endpoint: endpoint.to_string(),
            character,
        });
    }
    if endpoint
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(ConfigError::EndpointCaptureSegment(endpoint.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub transport: TransportKind,
    pub port: u16,
    pub endpoint: String,
}

impl ServerConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        validate_endpoint(&args.endpoint)?;

        Ok(Self {
            transport: TransportKind::parse_lenient(&args.transport),
            port: args.port,
            endpoint: args.endpoint,
        })
    }

    /// Listen on every interface
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

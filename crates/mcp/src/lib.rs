// MCP (Model Context Protocol) server for the Folo API
// Exposes the Folo tool catalog to agent clients; the stdio binding lives
// here, the HTTP/SSE binding in folo-server.

pub mod protocol;
pub mod server;
pub mod stdio;
pub mod tools;

pub use server::McpServer;
pub use stdio::{serve_io, serve_stdio};
pub use tools::{Forwarder, ToolRegistry};

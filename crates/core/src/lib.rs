// Core types for the Folo MCP server: upstream routes and the tool catalog

pub mod arguments;
pub mod error;
pub mod tools;
pub mod types;

pub use arguments::ToolArguments;
pub use error::ArgumentError;
pub use tools::{FoloTool, ParamKind, ParamSpec};
pub use types::*;

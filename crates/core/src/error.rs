use thiserror::Error;

/// Tool arguments that do not match the tool's parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Arguments for {tool} must be a JSON object")]
    NotAnObject { tool: &'static str },

    #[error("Invalid argument '{field}' for {tool}: expected {expected}")]
    InvalidValue {
        tool: &'static str,
        field: &'static str,
        expected: &'static str,
    },
}

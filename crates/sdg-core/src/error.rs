//! # Error Types
//!
//! Domain errors for tool dispatch and memory access.

use thiserror::Error;

/// Errors that can occur when invoking a tool through a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Tool was not found in the registry.
    #[error("Tool not found: {name}")]
    NotFound { name: String },

    /// Arguments did not match the tool's declared parameters.
    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidArgument { tool: String, message: String },

    /// Tool execution failed with an error message.
    #[error("Tool '{tool}' failed: {message}")]
    ExecutionFailed { tool: String, message: String },

    /// A tool could not be registered.
    #[error("Cannot register tool '{name}': {reason}")]
    Registration { name: String, reason: String },
}

impl ToolError {
    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ToolError::NotFound { .. } => "TOOL_NOT_FOUND",
            ToolError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ToolError::ExecutionFailed { .. } => "TOOL_EXECUTION_FAILED",
            ToolError::Registration { .. } => "TOOL_REGISTRATION_FAILED",
        }
    }
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur during memory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Failed to store data in memory.
    #[error("Failed to store key '{key}': {reason}")]
    StoreFailed { key: String, reason: String },

    /// Failed to load data from memory.
    #[error("Failed to load key '{key}': {reason}")]
    LoadFailed { key: String, reason: String },

    /// Key did not pass validation.
    #[error("Invalid memory key: {0}")]
    InvalidKey(#[from] crate::memory::InvalidMemoryKey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::NotFound {
            name: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Tool not found: missing");
        assert_eq!(err.error_code(), "TOOL_NOT_FOUND");
    }

    #[test]
    fn test_invalid_argument_code() {
        let err = ToolError::InvalidArgument {
            tool: "t".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert!(err.to_string().contains("bad"));
    }
}

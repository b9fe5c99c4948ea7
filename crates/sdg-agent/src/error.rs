//! Error types for the SDG agent.

use thiserror::Error;

use crate::completion::CompletionError;
use crate::config::ConfigError;

/// Errors that can occur when building or running an agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent could not be configured.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The completion backend failed; the error is passed through unchanged.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// A tool lookup or invocation failed.
    #[error(transparent)]
    Tool(#[from] sdg_core::ToolError),

    /// Reading or writing the memory store failed.
    #[error("Memory error: {0}")]
    Memory(#[from] sdg_core::MemoryError),

    /// The caller sent a request the agent cannot interpret.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentError {
    /// Check if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::Completion(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            AgentError::Config(_) => "CONFIG_ERROR",
            AgentError::Completion(err) => err.error_code(),
            AgentError::Tool(err) => err.error_code(),
            AgentError::Memory(_) => "MEMORY_ERROR",
            AgentError::InvalidRequest(_) => "INVALID_REQUEST",
            AgentError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

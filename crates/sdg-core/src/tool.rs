//! # Tool Contract
//!
//! A tool is a named, independently invocable operation exposed to the
//! orchestrator's planner. Tools receive their arguments as a JSON object
//! encoded in a string and answer with formatted text.

use serde::de::DeserializeOwned;

use crate::schema::ParamSpec;

/// Categorized failure reasons for tool execution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    /// Arguments did not match the tool's declared parameters
    InvalidInput {
        /// Description of what was invalid
        message: String,
    },
    /// Internal tool error or unexpected state
    InternalError {
        /// Description of the internal error
        message: String,
    },
}

impl FailureReason {
    /// Get a human-readable error message
    pub fn message(&self) -> String {
        match self {
            FailureReason::InvalidInput { message } => format!("Invalid input: {}", message),
            FailureReason::InternalError { message } => format!("Internal error: {}", message),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The result of executing a tool.
///
/// Either successful execution with output or a structured failure reason,
/// so success and failure can never be mixed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Tool executed successfully with the given output.
    Success { output: String },

    /// Tool execution failed with a structured reason.
    Failure { reason: FailureReason },
}

impl ExecutionResult {
    /// Create a successful execution result.
    pub fn success(output: String) -> Self {
        ExecutionResult::Success { output }
    }

    /// Create a failed execution result with a structured reason.
    pub fn failed(reason: FailureReason) -> Self {
        ExecutionResult::Failure { reason }
    }

    /// Create a failed result for an internal tool error.
    pub fn failure(message: impl Into<String>) -> Self {
        ExecutionResult::Failure {
            reason: FailureReason::InternalError {
                message: message.into(),
            },
        }
    }

    /// Create a failed result signalling an argument mismatch.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ExecutionResult::Failure {
            reason: FailureReason::InvalidInput {
                message: message.into(),
            },
        }
    }

    /// Check if the execution was successful.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    /// Check if the execution failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionResult::Failure { .. })
    }

    /// Get the output string (for success) or error message (for failure).
    pub fn output(&self) -> String {
        match self {
            ExecutionResult::Success { output } => output.clone(),
            ExecutionResult::Failure { reason } => reason.message(),
        }
    }

    /// Get the failure reason if available.
    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            ExecutionResult::Success { .. } => None,
            ExecutionResult::Failure { reason } => Some(reason),
        }
    }
}

/// Typed argument bundles that tools decode their input into.
///
/// The input must be a JSON object. Anything else, and any object that does
/// not deserialize into `Self`, is reported as
/// [`FailureReason::InvalidInput`].
pub trait ToolArgs: DeserializeOwned {
    fn parse(input: &str) -> Result<Self, FailureReason> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| FailureReason::InvalidInput {
                message: format!("arguments are not valid JSON: {}", e),
            })?;

        if !value.is_object() {
            return Err(FailureReason::InvalidInput {
                message: "arguments must be a JSON object".to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| FailureReason::InvalidInput {
            message: e.to_string(),
        })
    }
}

/// Trait defining an operation the planner can select and invoke.
///
/// # Example
///
/// ```rust
/// use sdg_core::{ExecutionResult, ParamSpec, Tool, ToolArgs};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct EchoArgs {
///     text: String,
/// }
///
/// impl ToolArgs for EchoArgs {}
///
/// struct EchoTool {
///     params: Vec<ParamSpec>,
/// }
///
/// impl Tool for EchoTool {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn parameters(&self) -> &[ParamSpec] {
///         &self.params
///     }
///
///     fn call(&self, input: String) -> ExecutionResult {
///         match EchoArgs::parse(&input) {
///             Ok(args) => ExecutionResult::success(args.text),
///             Err(reason) => ExecutionResult::failed(reason),
///         }
///     }
/// }
///
/// let tool = EchoTool { params: vec![ParamSpec::typed::<String>("text")] };
/// assert_eq!(tool.call(r#"{"text":"hi"}"#.to_string()).output(), "hi");
/// ```
pub trait Tool: Send + Sync {
    /// Unique name the registry routes calls by.
    fn name(&self) -> &str;

    /// Short description attached for the planner.
    ///
    /// An empty description makes the manifest fall back to
    /// [`Tool::documentation`].
    fn description(&self) -> &str {
        ""
    }

    /// Longer documentation text for the tool.
    fn documentation(&self) -> &str {
        ""
    }

    /// Declared parameters in declaration order.
    fn parameters(&self) -> &[ParamSpec] {
        &[]
    }

    /// Execute the tool with a JSON object encoded as a string.
    fn call(&self, input: String) -> ExecutionResult;
}

use sdg_core::validation::IdentifierRules;
use sdg_core::{ExecutionResult, FailureReason, Tool, ToolError, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::manifest::Manifest;

/// Name prefix marking a tool as internal: it stays registered but is never
/// enumerated, described in the manifest, or resolvable by name.
pub const INTERNAL_PREFIX: &str = "_";

/// Names reserved for the registry's own introspection operations.
pub const RESERVED_NAMES: &[&str] = &["get_all_kernel_functions", "generate_tools_json_doc"];

/// Trait for managing and dispatching tool calls.
///
/// Registries route incoming calls to the tool registered under the given
/// name.
pub trait ToolRegistry {
    /// Dispatch raw input to the named tool.
    ///
    /// Returns `None` if the tool is not found in the registry.
    fn dispatch(&self, name: &str, input: String) -> Option<ExecutionResult>;

    /// Dispatch with structured errors.
    ///
    /// Unknown names become [`ToolError::NotFound`]; argument mismatches
    /// reported by the tool become [`ToolError::InvalidArgument`] and any
    /// other failure [`ToolError::ExecutionFailed`].
    fn try_dispatch(&self, name: &str, input: String) -> ToolResult<String> {
        match self.dispatch(name, input) {
            None => Err(ToolError::NotFound {
                name: name.to_string(),
            }),
            Some(ExecutionResult::Success { output }) => Ok(output),
            Some(ExecutionResult::Failure { reason }) => Err(match reason {
                FailureReason::InvalidInput { message } => ToolError::InvalidArgument {
                    tool: name.to_string(),
                    message,
                },
                FailureReason::InternalError { message } => ToolError::ExecutionFailed {
                    tool: name.to_string(),
                    message,
                },
            }),
        }
    }
}

/// In-memory tool registry that preserves declaration order.
///
/// Tools are kept in the order they were registered; a name index gives
/// O(1) lookup. The registry is meant to be built once at startup and only
/// read afterwards, so it can be shared freely across agents and tasks.
///
/// # Example
///
/// ```rust
/// use sdg_tools::{FnTool, InMemoryToolRegistry, ParamSpec};
/// use sdg_core::ExecutionResult;
/// use std::sync::Arc;
///
/// let echo = FnTool::builder("echo")
///     .description("Echo the input")
///     .param(ParamSpec::typed::<String>("text"))
///     .handler(|input| ExecutionResult::success(input));
///
/// let registry = InMemoryToolRegistry::new()
///     .try_with_tool(Arc::new(echo))
///     .expect("valid tool");
///
/// assert_eq!(registry.tool_names(), vec!["echo"]);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl InMemoryToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, rejecting invalid, reserved and duplicate names.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> ToolResult<()> {
        let name = tool.name().to_string();

        IdentifierRules::TOOL_NAME
            .validate(&name)
            .map_err(|e| ToolError::Registration {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(ToolError::Registration {
                name,
                reason: "name is reserved for registry introspection".to_string(),
            });
        }

        if self.index.contains_key(&name) {
            return Err(ToolError::Registration {
                name,
                reason: "a tool with this name is already registered".to_string(),
            });
        }

        tracing::debug!(tool = %name, position = self.tools.len(), "Registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn try_with_tool(mut self, tool: Arc<dyn Tool>) -> ToolResult<Self> {
        self.register(tool)?;
        Ok(self)
    }

    /// Build a registry from a tool list, in list order.
    pub fn from_tools<I>(tools: I) -> ToolResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Whether a name designates an externally invokable tool.
    pub fn is_external(name: &str) -> bool {
        !name.starts_with(INTERNAL_PREFIX) && !RESERVED_NAMES.contains(&name)
    }

    /// The externally invokable tools, in declaration order.
    ///
    /// Internal tools (prefixed with [`INTERNAL_PREFIX`]) are skipped.
    pub fn callables(&self) -> Vec<(&str, Arc<dyn Tool>)> {
        self.tools
            .iter()
            .filter(|tool| Self::is_external(tool.name()))
            .map(|tool| (tool.name(), Arc::clone(tool)))
            .collect()
    }

    /// Names of the externally invokable tools, in declaration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.callables().into_iter().map(|(name, _)| name).collect()
    }

    /// Look up an externally invokable tool by name.
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        if !Self::is_external(name) {
            return None;
        }
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    /// Invoke a tool with a structured argument bundle.
    pub fn invoke(&self, name: &str, arguments: &serde_json::Value) -> ToolResult<String> {
        tracing::debug!(tool = %name, "Invoking tool");
        self.try_dispatch(name, arguments.to_string())
    }

    /// Describe every externally invokable tool for the planner.
    pub fn manifest(&self, agent: &str) -> Manifest {
        Manifest::generate(agent, self)
    }

    /// Number of externally invokable tools.
    pub fn len(&self) -> usize {
        self.tools
            .iter()
            .filter(|tool| Self::is_external(tool.name()))
            .count()
    }

    /// Check if the registry exposes no tools.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for InMemoryToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
        f.debug_struct("InMemoryToolRegistry")
            .field("tools", &names)
            .finish()
    }
}

impl ToolRegistry for InMemoryToolRegistry {
    fn dispatch(&self, name: &str, input: String) -> Option<ExecutionResult> {
        self.get_tool(name).map(|tool| tool.call(input))
    }
}

//! # SDG Tools
//!
//! Tools exposed to the orchestrator's planner on behalf of the SDG agent.
//!
//! - **Registry**: an ordered, read-only-after-build collection of tools with
//!   dispatch by name
//! - **Manifest**: the JSON description of every externally invokable tool
//! - **Standard tools**: the SDG alignment, indicator and agency tools

/// Closure-backed tools declared with a builder.
pub mod function;
/// Planner manifest generation.
pub mod manifest;
/// Tool registry implementations.
pub mod registry;
/// The SDG tool set.
pub mod standard;

pub use function::{FnTool, FnToolBuilder};
pub use manifest::{Manifest, ManifestEntry, ToolDescriptor};
pub use registry::{INTERNAL_PREFIX, InMemoryToolRegistry, RESERVED_NAMES, ToolRegistry};
pub use sdg_core::{ExecutionResult, FailureReason, ParamSpec, ParamType, Tool, ToolError};
pub use standard::*;

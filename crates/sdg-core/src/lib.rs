//! # SDG Core
//!
//! Core traits and types shared by the SDG agent crates.
//! This crate provides the tool contract, typed parameter schemas and the
//! memory abstraction the agent writes step results into.

pub mod error;
pub mod in_memory;
pub mod memory;
pub mod schema;
pub mod tool;
pub mod validation;

pub use error::{MemoryError, ToolError, ToolResult};
pub use in_memory::InMemoryMemory;
pub use memory::{InvalidMemoryKey, Memory, MemoryKey, MemoryReader, MemoryUpdate, MemoryWriter};
pub use schema::{ParamSpec, ParamType, SchemaType, derive_title};
pub use tool::{ExecutionResult, FailureReason, Tool, ToolArgs};
pub use validation::{IdentifierRules, ValidationError};

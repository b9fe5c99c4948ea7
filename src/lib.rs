//! # SDG Agent
//!
//! Umbrella crate for the SDG agent workspace.
//!
//! - [`contracts`]: tool and memory contracts
//! - [`tools`]: tool registry, planner manifest and the SDG tool set
//! - [`agent`]: the SDG agent facade, completion backends and settings

pub use sdg_agent as agent;
pub use sdg_core as contracts;
pub use sdg_tools as tools;

pub use sdg_agent::{
    Agent, AgentError, AgentResult, AgentSettings, AnalysisResult, CompletionClient,
    CompletionError, SdgAgent,
};
pub use sdg_core::{ExecutionResult, Memory, MemoryUpdate, Tool, ToolError};
pub use sdg_tools::{InMemoryToolRegistry, Manifest, sdg_registry};

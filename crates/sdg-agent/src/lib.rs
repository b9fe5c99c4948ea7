//! # SDG Agent
//!
//! The SDG agent answers orchestrator requests about the UN Sustainable
//! Development Goals. It binds a system prompt and identity to a pluggable
//! completion backend and exposes:
//!
//! - **Analysis operations**: SDG alignment, indicator suggestion and UN
//!   agency identification, each a single completion call
//! - **Message routing**: free-text messages dispatched to the matching
//!   analysis through an [`IntentClassifier`]
//! - **Action requests**: the orchestrator's generic step protocol, handled
//!   by the shared [`BaseAgent`]
//! - **Tools**: the SDG tool registry and its planner manifest
//!
//! ## Example
//!
//! ```rust,ignore
//! use sdg_agent::{Agent, HttpCompletionClient, SdgAgent, AgentSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = AgentSettings::load(None)?;
//!     let client = HttpCompletionClient::from_settings(&settings.completion)?;
//!
//!     let agent = SdgAgent::builder()
//!         .settings(&settings)
//!         .client(Arc::new(client))
//!         .build()?;
//!
//!     let answer = agent.process_message("Which agencies could partner with us?").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod agent;
pub mod base;
pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod prompts;
pub mod router;

pub use action::{ActionRequest, ActionResponse, StepStatus};
pub use agent::{Agent, AnalysisResult, SdgAgent, SdgAgentBuilder};
pub use base::{AgentIdentity, BaseAgent};
pub use completion::{
    CompletionClient, CompletionError, CompletionOptions, RetryPolicy, RetryingCompletionClient,
};
pub use config::{AgentSection, AgentSettings, CompletionSection, ConfigError};
pub use error::{AgentError, AgentResult};
pub use http::HttpCompletionClient;
pub use prompts::PromptPreset;
pub use router::{Intent, IntentClassifier, KeywordRouter};

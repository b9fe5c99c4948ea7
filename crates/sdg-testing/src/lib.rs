//! # SDG Testing Utilities
//!
//! Test doubles for exercising agents without a live model:
//!
//! - **Mock completion client**: canned replies keyed by prompt substring,
//!   prompt history and injected failures
//! - **Mock tools**: predictable tool implementations with call tracking
//!
//! ## Usage
//!
//! ```rust
//! use sdg_agent::{Agent, SdgAgent};
//! use sdg_testing::MockCompletionClient;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let client = Arc::new(MockCompletionClient::new().with_default_reply("canned"));
//! let agent = SdgAgent::builder().client(client.clone()).build().unwrap();
//!
//! assert_eq!(agent.process_message("hello").await.unwrap(), "canned");
//! assert_eq!(client.prompts(), vec!["hello".to_string()]);
//! # });
//! ```

/// Scripted completion backend.
pub mod mock_completion;
/// Mock tools for predictable testing.
pub mod mock_tools;

pub use mock_completion::{MockCompletionClient, RecordedCall};
pub use mock_tools::MockTool;

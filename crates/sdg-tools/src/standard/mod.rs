//! # Standard Tool Library
//!
//! The SDG tool set exposed to the planner. Every tool answers with a
//! deterministic markdown block that ends with [`FORMATTING_INSTRUCTIONS`].
//!
//! ## Usage
//!
//! ```rust
//! use sdg_tools::standard::sdg_registry;
//!
//! let registry = sdg_registry().expect("standard tools register");
//! let answer = registry
//!     .invoke(
//!         "suggest_sdg_indicators",
//!         &serde_json::json!({ "project_description": "Solar microgrids for rural clinics" }),
//!     )
//!     .expect("tool succeeds");
//! assert!(answer.contains("AGENT SUMMARY"));
//! ```

/// The seventeen goals.
pub mod goals;
/// SDG analysis tools.
pub mod sdg;

pub use goals::{GOAL_COUNT, Goal, goal_name};
pub use sdg::{
    AnalyzeSdgAlignmentTool, FORMATTING_INSTRUCTIONS, IdentifyUnAgenciesTool, PREVIEW_LEN,
    SuggestSdgIndicatorsTool, preview, sdg_registry, sdg_tools,
};

//! # SDG Tools
//!
//! Alignment analysis, indicator suggestion and UN agency identification.
//! Free-text input is echoed back as a preview of at most [`PREVIEW_LEN`]
//! characters.

use sdg_core::{ExecutionResult, ParamSpec, Tool, ToolArgs, ToolResult};
use serde::Deserialize;
use std::sync::Arc;

use super::goals::{GOAL_COUNT, Goal};
use crate::registry::InMemoryToolRegistry;

/// Trailing block every tool response ends with. The orchestrator relies on
/// the exact wording.
pub const FORMATTING_INSTRUCTIONS: &str = "Instructions: returning the output of this function call verbatim to the user in markdown. Then write AGENT SUMMARY: and then include a summary of what you did.";

/// Maximum number of characters of free-text input echoed in a response.
pub const PREVIEW_LEN: usize = 50;

/// First [`PREVIEW_LEN`] characters of `text`, followed by `...` when the
/// text was cut.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn respond(body: String) -> ExecutionResult {
    ExecutionResult::success(format!("{}\n\n{}", body, FORMATTING_INSTRUCTIONS))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlignmentArgs {
    project_description: String,
    #[serde(default)]
    sdg_number: Option<u8>,
}

impl ToolArgs for AlignmentArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectArgs {
    project_description: String,
}

impl ToolArgs for ProjectArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InitiativeArgs {
    initiative_description: String,
}

impl ToolArgs for InitiativeArgs {}

/// Analyze how a project aligns with the Sustainable Development Goals.
pub struct AnalyzeSdgAlignmentTool {
    params: Vec<ParamSpec>,
}

impl AnalyzeSdgAlignmentTool {
    pub fn new() -> Self {
        Self {
            params: vec![
                ParamSpec::typed::<String>("project_description"),
                ParamSpec::typed::<Option<u8>>("sdg_number").optional(),
            ],
        }
    }
}

impl Default for AnalyzeSdgAlignmentTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for AnalyzeSdgAlignmentTool {
    fn name(&self) -> &str {
        "analyze_sdg_alignment"
    }

    fn description(&self) -> &str {
        "Analyze how a project aligns with the Sustainable Development Goals"
    }

    fn documentation(&self) -> &str {
        "Analyze how a project aligns with the Sustainable Development Goals. \
         project_description: description of the project to analyze. \
         sdg_number: optional specific SDG number to focus on (1-17)."
    }

    fn parameters(&self) -> &[ParamSpec] {
        &self.params
    }

    fn call(&self, input: String) -> ExecutionResult {
        let args = match AlignmentArgs::parse(&input) {
            Ok(args) => args,
            Err(reason) => return ExecutionResult::failed(reason),
        };

        let scope = match args.sdg_number.map(|n| (n, Goal::new(n))) {
            None => "All 17 Sustainable Development Goals".to_string(),
            Some((_, Some(goal))) => goal.to_string(),
            Some((n, None)) => {
                return ExecutionResult::invalid_input(format!(
                    "sdg_number must be between 1 and {}, got {}",
                    GOAL_COUNT, n
                ));
            }
        };

        let project = preview(&args.project_description);
        tracing::info!(tool = %self.name(), project = %project, "Analyzing SDG alignment");

        respond(format!(
            "##### SDG Alignment Analysis\n\
             **Project:** {project}\n\
             **Scope:** {scope}\n\n\
             Alignment review requested. The analysis covers the specific targets addressed, \
             an alignment rating (strong, moderate, weak), metrics to measure progress and \
             improvements that would strengthen SDG alignment."
        ))
    }
}

/// Suggest appropriate SDG indicators for measuring project impact.
pub struct SuggestSdgIndicatorsTool {
    params: Vec<ParamSpec>,
}

impl SuggestSdgIndicatorsTool {
    pub fn new() -> Self {
        Self {
            params: vec![ParamSpec::typed::<String>("project_description")],
        }
    }
}

impl Default for SuggestSdgIndicatorsTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SuggestSdgIndicatorsTool {
    fn name(&self) -> &str {
        "suggest_sdg_indicators"
    }

    fn description(&self) -> &str {
        "Suggest appropriate SDG indicators for measuring project impact"
    }

    fn parameters(&self) -> &[ParamSpec] {
        &self.params
    }

    fn call(&self, input: String) -> ExecutionResult {
        let args = match ProjectArgs::parse(&input) {
            Ok(args) => args,
            Err(reason) => return ExecutionResult::failed(reason),
        };

        let project = preview(&args.project_description);
        tracing::info!(tool = %self.name(), project = %project, "Suggesting SDG indicators");

        respond(format!(
            "##### SDG Indicator Suggestions\n\
             **Project:** {project}\n\n\
             Indicator review requested. Each suggested indicator names its SDG and target, \
             explains why it fits the project, proposes practical data collection methods and \
             notes potential measurement challenges."
        ))
    }
}

/// Identify relevant UN agencies for a project or initiative.
pub struct IdentifyUnAgenciesTool {
    params: Vec<ParamSpec>,
}

impl IdentifyUnAgenciesTool {
    pub fn new() -> Self {
        Self {
            params: vec![ParamSpec::typed::<String>("initiative_description")],
        }
    }
}

impl Default for IdentifyUnAgenciesTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for IdentifyUnAgenciesTool {
    fn name(&self) -> &str {
        "identify_un_agencies"
    }

    fn description(&self) -> &str {
        "Identify relevant UN agencies for a project or initiative"
    }

    fn parameters(&self) -> &[ParamSpec] {
        &self.params
    }

    fn call(&self, input: String) -> ExecutionResult {
        let args = match InitiativeArgs::parse(&input) {
            Ok(args) => args,
            Err(reason) => return ExecutionResult::failed(reason),
        };

        let initiative = preview(&args.initiative_description);
        tracing::info!(tool = %self.name(), initiative = %initiative, "Identifying UN agencies");

        respond(format!(
            "##### Relevant UN Agencies\n\
             **Initiative:** {initiative}\n\n\
             Agency mapping requested. Each identified UN agency or entity comes with its \
             relevance to the initiative, the expertise or resources it offers and possible \
             engagement mechanisms such as technical assistance, funding or partnership."
        ))
    }
}

/// The SDG tools in declaration order.
pub fn sdg_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(AnalyzeSdgAlignmentTool::new()),
        Arc::new(SuggestSdgIndicatorsTool::new()),
        Arc::new(IdentifyUnAgenciesTool::new()),
    ]
}

/// A registry holding the SDG tools.
pub fn sdg_registry() -> ToolResult<InMemoryToolRegistry> {
    InMemoryToolRegistry::from_tools(sdg_tools())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use sdg_core::{FailureReason, ParamType, ToolError};
    use serde_json::json;

    proptest! {
        #[test]
        fn preview_is_a_bounded_prefix(text in "\\PC{0,120}") {
            let cut = preview(&text);
            let kept = cut.strip_suffix("...").filter(|_| text.chars().count() > PREVIEW_LEN);
            match kept {
                Some(prefix) => {
                    prop_assert_eq!(prefix.chars().count(), PREVIEW_LEN);
                    prop_assert!(text.starts_with(prefix));
                }
                None => prop_assert_eq!(cut, text),
            }
        }
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "project_description": 42 }))]
    #[case(json!({ "project_description": "p", "sdg_number": "seven" }))]
    #[case(json!(["project_description"]))]
    fn alignment_argument_mismatches(#[case] args: serde_json::Value) {
        let err = sdg_registry()
            .unwrap()
            .invoke("analyze_sdg_alignment", &args)
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }), "{args}");
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "a".repeat(200);
        let cut = preview(&long);
        assert_eq!(cut, format!("{}...", "a".repeat(50)));

        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"b".repeat(50)), "b".repeat(50));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(60);
        assert_eq!(preview(&text), format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn alignment_echoes_truncated_description() {
        let description = format!("{}{}", "x".repeat(50), "Z".repeat(150));
        let output = AnalyzeSdgAlignmentTool::new()
            .call(json!({ "project_description": description }).to_string())
            .output();

        assert!(output.contains(&format!("**Project:** {}...\n", "x".repeat(50))));
        assert!(!output.contains("xZ"));
        assert!(output.contains("All 17 Sustainable Development Goals"));
        assert!(output.ends_with(FORMATTING_INSTRUCTIONS));
    }

    #[test]
    fn alignment_focuses_on_requested_goal() {
        let output = AnalyzeSdgAlignmentTool::new()
            .call(
                json!({ "project_description": "Coastal mangroves", "sdg_number": 14 }).to_string(),
            )
            .output();
        assert!(output.contains("**Scope:** SDG 14: Life Below Water"));
    }

    #[test]
    fn alignment_rejects_out_of_range_goal() {
        let result = AnalyzeSdgAlignmentTool::new()
            .call(json!({ "project_description": "p", "sdg_number": 18 }).to_string());
        assert!(matches!(
            result.failure_reason(),
            Some(FailureReason::InvalidInput { .. })
        ));
    }

    #[test]
    fn tools_reject_wrong_argument_names() {
        let registry = sdg_registry().unwrap();
        let err = registry
            .invoke(
                "identify_un_agencies",
                &json!({ "project_description": "wrong field" }),
            )
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn every_tool_ends_with_instructions() {
        let registry = sdg_registry().unwrap();
        let cases = [
            ("analyze_sdg_alignment", json!({ "project_description": "p" })),
            ("suggest_sdg_indicators", json!({ "project_description": "p" })),
            ("identify_un_agencies", json!({ "initiative_description": "i" })),
        ];

        for (name, args) in cases {
            let output = registry.invoke(name, &args).unwrap();
            assert!(output.ends_with(FORMATTING_INSTRUCTIONS), "{name}");
            assert!(output.starts_with("##### "), "{name}");
        }
    }

    #[test]
    fn registry_declares_typed_parameters() {
        let registry = sdg_registry().unwrap();
        assert_eq!(
            registry.tool_names(),
            vec![
                "analyze_sdg_alignment",
                "suggest_sdg_indicators",
                "identify_un_agencies"
            ]
        );

        let alignment = registry.get_tool("analyze_sdg_alignment").unwrap();
        let types: Vec<_> = alignment.parameters().iter().map(|p| p.param_type).collect();
        assert_eq!(types, vec![ParamType::String, ParamType::Int]);
    }
}

//! # Planner Manifest
//!
//! The manifest tells the orchestrator's planner which tools an agent offers
//! and how to call them. Its shape is fixed by the planner:
//!
//! ```json
//! [
//!   {
//!     "agent": "SDGAgent",
//!     "function": "suggest_sdg_indicators",
//!     "description": "Suggest appropriate SDG indicators ...",
//!     "arguments": "{'project_description': {'description': 'project_description', 'title': 'Project Description', 'type': 'string'}}"
//!   }
//! ]
//! ```
//!
//! `arguments` is itself a JSON document, embedded as a string, with every
//! double quote swapped for a single quote and `", "` / `": "` separators.

use sdg_core::{ParamSpec, ParamType, Tool};
use serde::Serialize;
use serde::ser::SerializeMap;
use std::io;

use crate::registry::InMemoryToolRegistry;

/// Description of one tool, derived from its registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDescriptor {
    /// Describe a tool. The attached description wins; the documentation
    /// text is used when the description is empty.
    pub fn from_tool(tool: &dyn Tool) -> Self {
        let description = match tool.description().trim() {
            "" => tool.documentation().trim(),
            attached => attached,
        };

        Self {
            name: tool.name().to_string(),
            description: description.to_string(),
            parameters: tool.parameters().to_vec(),
        }
    }

    /// The argument schema in the planner's single-quoted encoding.
    pub fn arguments_literal(&self) -> String {
        let schema = ArgumentSchema(&self.parameters);
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);

        match schema.serialize(&mut ser) {
            Ok(()) => String::from_utf8_lossy(&buf).replace('"', "'"),
            Err(e) => {
                tracing::warn!(tool = %self.name, error = %e, "Argument schema degraded to empty");
                "{}".to_string()
            }
        }
    }
}

/// Serialized form of a descriptor, as the planner reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub agent: String,
    pub function: String,
    pub description: String,
    pub arguments: String,
}

/// Ordered tool descriptions for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    agent: String,
    descriptors: Vec<ToolDescriptor>,
}

impl Manifest {
    /// Describe every externally invokable tool of `registry`, in
    /// declaration order. Recomputed on every call.
    pub fn generate(agent: &str, registry: &InMemoryToolRegistry) -> Self {
        let descriptors = registry
            .callables()
            .into_iter()
            .map(|(_, tool)| ToolDescriptor::from_tool(tool.as_ref()))
            .collect();

        Self {
            agent: agent.to_string(),
            descriptors,
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn entries(&self) -> Vec<ManifestEntry> {
        self.descriptors
            .iter()
            .map(|d| ManifestEntry {
                agent: self.agent.clone(),
                function: d.name.clone(),
                description: d.description.clone(),
                arguments: d.arguments_literal(),
            })
            .collect()
    }

    /// Pretty-printed JSON array; an empty manifest is `[]`.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.entries()).unwrap_or_else(|e| {
            tracing::warn!(agent = %self.agent, error = %e, "Manifest serialization failed");
            "[]".to_string()
        })
    }
}

/// `{param: {description, title, type}}` in declaration order.
struct ArgumentSchema<'a>(&'a [ParamSpec]);

#[derive(Serialize)]
struct ArgumentEntry<'a> {
    description: &'a str,
    title: String,
    #[serde(rename = "type")]
    param_type: ParamType,
}

impl Serialize for ArgumentSchema<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for param in self.0 {
            map.serialize_entry(
                &param.name,
                &ArgumentEntry {
                    description: &param.name,
                    title: param.title(),
                    param_type: param.param_type,
                },
            )?;
        }
        map.end()
    }
}

/// Compact JSON with a space after every `,` and `:`.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FnTool;
    use sdg_core::ExecutionResult;
    use std::sync::Arc;

    fn noop(name: &str) -> FnTool {
        FnTool::builder(name).handler(|_| ExecutionResult::success(String::new()))
    }

    #[test]
    fn arguments_use_single_quotes_and_spaced_separators() {
        let descriptor = ToolDescriptor {
            name: "analyze_sdg_alignment".to_string(),
            description: "d".to_string(),
            parameters: vec![
                ParamSpec::typed::<String>("project_description"),
                ParamSpec::typed::<Option<u8>>("sdg_number").optional(),
            ],
        };

        assert_eq!(
            descriptor.arguments_literal(),
            "{'project_description': {'description': 'project_description', \
             'title': 'Project Description', 'type': 'string'}, \
             'sdg_number': {'description': 'sdg_number', 'title': 'Sdg Number', 'type': 'int'}}"
        );
    }

    #[test]
    fn no_parameters_encode_as_empty_object() {
        let descriptor = ToolDescriptor::from_tool(&noop("ping"));
        assert_eq!(descriptor.arguments_literal(), "{}");
    }

    #[test]
    fn description_falls_back_to_documentation() {
        let documented = FnTool::builder("documented")
            .documentation("  Taken from the docs.  ")
            .handler(|_| ExecutionResult::success(String::new()));
        assert_eq!(
            ToolDescriptor::from_tool(&documented).description,
            "Taken from the docs."
        );

        let both = FnTool::builder("both")
            .description("Attached")
            .documentation("Docs")
            .handler(|_| ExecutionResult::success(String::new()));
        assert_eq!(ToolDescriptor::from_tool(&both).description, "Attached");
    }

    #[test]
    fn empty_registry_yields_empty_array() {
        let manifest = InMemoryToolRegistry::new().manifest("SDGAgent");
        assert!(manifest.is_empty());
        let parsed: serde_json::Value = serde_json::from_str(&manifest.to_json()).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }

    #[test]
    fn entries_carry_agent_tag_in_order() {
        let registry = InMemoryToolRegistry::from_tools([
            Arc::new(noop("second_tool")) as Arc<dyn Tool>,
            Arc::new(noop("first_tool")),
        ])
        .unwrap();

        let entries = registry.manifest("PlannerAgent").entries();
        let functions: Vec<_> = entries.iter().map(|e| e.function.as_str()).collect();
        assert_eq!(functions, vec!["second_tool", "first_tool"]);
        assert!(entries.iter().all(|e| e.agent == "PlannerAgent"));
    }
}

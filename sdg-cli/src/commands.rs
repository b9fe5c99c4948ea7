use sdg_agent::{
    ActionRequest, ActionResponse, Agent, AgentError, AgentSettings, ConfigError,
    HttpCompletionClient, RetryingCompletionClient, SdgAgent,
};
use sdg_core::ToolError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized failed `ActionResponse`, printed as the command output.
    #[error("{0}")]
    StepFailed(String),
}

fn settings(config: Option<&Path>) -> Result<AgentSettings, CliError> {
    Ok(AgentSettings::load(config)?)
}

fn build_agent(settings: &AgentSettings) -> Result<SdgAgent, CliError> {
    let http = HttpCompletionClient::from_settings(&settings.completion)?;
    let client = RetryingCompletionClient::new(http, settings.completion.retry_policy());
    Ok(SdgAgent::from_settings(settings, Arc::new(client))?)
}

pub fn run_tools() -> Result<String, CliError> {
    let registry = sdg_tools::sdg_registry()?;
    let lines: Vec<String> = registry
        .callables()
        .into_iter()
        .map(|(name, tool)| format!("{name}\t{}", tool.description()))
        .collect();
    Ok(lines.join("\n"))
}

pub fn run_manifest(config: Option<&Path>) -> Result<String, CliError> {
    render_manifest(&settings(config)?)
}

fn render_manifest(settings: &AgentSettings) -> Result<String, CliError> {
    let registry = sdg_tools::sdg_registry()?;
    Ok(registry.manifest(&settings.agent.name).to_json())
}

pub fn run_invoke(tool: &str, args: &str) -> Result<String, CliError> {
    let arguments: serde_json::Value = serde_json::from_str(args)?;
    let registry = sdg_tools::sdg_registry()?;
    Ok(registry.invoke(tool, &arguments)?)
}

pub async fn run_ask(config: Option<&Path>, message: &str) -> Result<String, CliError> {
    let settings = settings(config)?;
    let agent = build_agent(&settings)?;
    Ok(agent.process_message(message).await?)
}

pub async fn run_action(config: Option<&Path>, raw: &str) -> Result<String, CliError> {
    let settings = settings(config)?;
    let agent = build_agent(&settings)?;
    handle_action(&agent, raw).await
}

/// Run one orchestrator step. A step that fails after its request parsed
/// becomes `StepFailed` carrying a serialized `failed` response.
async fn handle_action(agent: &SdgAgent, raw: &str) -> Result<String, CliError> {
    match agent.handle_action_request(raw).await {
        Ok(response) => Ok(response),
        Err(err) => {
            let request: ActionRequest = match serde_json::from_str(raw) {
                Ok(request) => request,
                Err(_) => return Err(err.into()),
            };
            tracing::warn!(step_id = %request.step_id, code = err.error_code(), "Action failed");
            let failed = ActionResponse::failed(&request, agent.name(), err.to_string());
            Err(CliError::StepFailed(serde_json::to_string(&failed)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdg_agent::{CompletionError, StepStatus};
    use sdg_testing::MockCompletionClient;
    use serde_json::json;
    use std::io::Write;

    fn agent_with(client: MockCompletionClient) -> SdgAgent {
        SdgAgent::builder()
            .client(Arc::new(client))
            .build()
            .unwrap()
    }

    fn failed_response(err: CliError) -> ActionResponse {
        match err {
            CliError::StepFailed(out) => serde_json::from_str(&out).unwrap(),
            other => panic!("expected a failed step, got {other}"),
        }
    }

    #[test]
    fn tools_lists_one_line_per_callable() {
        let out = run_tools().unwrap();
        let names: Vec<&str> = out
            .lines()
            .map(|line| line.split('\t').next().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "analyze_sdg_alignment",
                "suggest_sdg_indicators",
                "identify_un_agencies"
            ]
        );
        assert!(out.lines().all(|line| line.split('\t').nth(1).is_some()));
    }

    #[test]
    fn invoke_runs_a_tool() {
        let out = run_invoke(
            "identify_un_agencies",
            r#"{"initiative_description": "Flood early warning"}"#,
        )
        .unwrap();
        assert!(out.contains("Flood early warning"));
    }

    #[test]
    fn invoke_unknown_tool_is_not_found() {
        let err = run_invoke("missing_tool", "{}").unwrap_err();
        assert!(matches!(err, CliError::Tool(ToolError::NotFound { .. })));
    }

    #[test]
    fn invoke_rejects_malformed_arguments() {
        let err = run_invoke("identify_un_agencies", "{not json").unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn manifest_uses_configured_agent_name() {
        let settings = AgentSettings::from_toml("[agent]\nname = \"CliAgent\"\n").unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&render_manifest(&settings).unwrap()).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|entry| entry["agent"] == "CliAgent"));
    }

    #[test]
    fn manifest_loads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nname = \"CliAgent\"").unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&run_manifest(Some(file.path())).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);

        let missing = file.path().with_extension("absent");
        let err = run_manifest(Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Io { .. })));
    }

    #[tokio::test]
    async fn action_success_returns_completed_response() {
        let agent = agent_with(MockCompletionClient::new().with_default_reply("step done"));
        let raw = serde_json::to_string(&ActionRequest::new("plan-1", "step-1", "s", "Rate it"))
            .unwrap();

        let out = handle_action(&agent, &raw).await.unwrap();
        let response: ActionResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.status, StepStatus::Completed);
        assert_eq!(response.result, "step done");
    }

    #[tokio::test]
    async fn failed_completion_becomes_failed_response() {
        let agent = agent_with(MockCompletionClient::new().with_failure(
            CompletionError::Terminal {
                message: "invalid api key".to_string(),
            },
        ));
        let raw = serde_json::to_string(&ActionRequest::new("plan-1", "step-2", "s", "Rate it"))
            .unwrap();

        let response = failed_response(handle_action(&agent, &raw).await.unwrap_err());
        assert_eq!(response.status, StepStatus::Failed);
        assert_eq!(response.step_id, "step-2");
        assert_eq!(response.plan_id, "plan-1");
        assert_eq!(response.agent, "SDGAgent");
        assert!(response.result.contains("invalid api key"));
    }

    #[tokio::test]
    async fn unknown_tool_step_becomes_failed_response() {
        let agent = agent_with(MockCompletionClient::new());
        let raw = serde_json::to_string(
            &ActionRequest::new("plan-1", "step-3", "s", "x").with_tool("missing_tool", json!({})),
        )
        .unwrap();

        let response = failed_response(handle_action(&agent, &raw).await.unwrap_err());
        assert_eq!(response.status, StepStatus::Failed);
        assert!(response.result.contains("missing_tool"));
    }

    #[tokio::test]
    async fn unparseable_request_is_an_agent_error() {
        let client = MockCompletionClient::new();
        let agent = agent_with(client.clone());

        let err = handle_action(&agent, "not json").await.unwrap_err();
        assert!(matches!(err, CliError::Agent(AgentError::InvalidRequest(_))));
        assert_eq!(client.call_count(), 0);
    }
}

//! Orchestrator step protocol.

use serde::{Deserialize, Serialize};

/// One plan step sent by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub step_id: String,
    pub plan_id: String,
    pub session_id: String,
    /// Natural-language description of the step.
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Tool to invoke instead of completing `action`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

impl ActionRequest {
    pub fn new(
        plan_id: impl Into<String>,
        step_id: impl Into<String>,
        session_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            step_id: step_id.into(),
            plan_id: plan_id.into(),
            session_id: session_id.into(),
            action: action.into(),
            agent: None,
            tool: None,
            arguments: None,
        }
    }

    pub fn with_tool(mut self, tool: impl Into<String>, arguments: serde_json::Value) -> Self {
        self.tool = Some(tool.into());
        self.arguments = Some(arguments);
        self
    }

    /// Memory key the step result is stored under.
    pub fn memory_key(&self) -> String {
        format!("step:{}:{}", self.plan_id, self.step_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Failed,
}

/// Outcome of one plan step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub step_id: String,
    pub plan_id: String,
    pub session_id: String,
    pub agent: String,
    pub result: String,
    pub status: StepStatus,
}

impl ActionResponse {
    pub fn completed(request: &ActionRequest, agent: &str, result: String) -> Self {
        Self::with_status(request, agent, result, StepStatus::Completed)
    }

    pub fn failed(request: &ActionRequest, agent: &str, reason: String) -> Self {
        Self::with_status(request, agent, reason, StepStatus::Failed)
    }

    fn with_status(
        request: &ActionRequest,
        agent: &str,
        result: String,
        status: StepStatus,
    ) -> Self {
        Self {
            step_id: request.step_id.clone(),
            plan_id: request.plan_id.clone(),
            session_id: request.session_id.clone(),
            agent: agent.to_string(),
            result,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_request() {
        let request: ActionRequest = serde_json::from_value(json!({
            "step_id": "s1",
            "plan_id": "p1",
            "session_id": "sess",
            "action": "Assess SDG fit"
        }))
        .unwrap();

        assert_eq!(request.tool, None);
        assert_eq!(request.memory_key(), "step:p1:s1");
    }

    #[test]
    fn response_status_is_lowercase() {
        let request = ActionRequest::new("p", "s", "sess", "a");
        let response = ActionResponse::failed(&request, "SDGAgent", "boom".to_string());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["agent"], "SDGAgent");
        assert_eq!(value["step_id"], "s");
    }
}

//! Shared agent plumbing: identity, system prompt, memory, tools and the
//! completion backend.

use sdg_core::{Memory, MemoryKey, MemoryUpdate};
use sdg_tools::{InMemoryToolRegistry, Manifest};
use std::sync::Arc;

use crate::action::{ActionRequest, ActionResponse};
use crate::completion::{CompletionClient, CompletionOptions};
use crate::error::{AgentError, AgentResult};

/// Who an agent is and which conversation it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentIdentity {
    pub name: String,
    pub session_id: String,
    pub user_id: String,
}

impl AgentIdentity {
    pub fn new(
        name: impl Into<String>,
        session_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }
}

impl Default for AgentIdentity {
    fn default() -> Self {
        Self::new("SDGAgent", "", "")
    }
}

/// Configuration every agent is built on. Immutable after construction.
pub struct BaseAgent {
    identity: AgentIdentity,
    system_prompt: String,
    memory: Arc<dyn Memory>,
    client: Arc<dyn CompletionClient>,
    tools: InMemoryToolRegistry,
    options: CompletionOptions,
}

impl BaseAgent {
    pub fn new(
        identity: AgentIdentity,
        system_prompt: String,
        memory: Arc<dyn Memory>,
        client: Arc<dyn CompletionClient>,
        tools: InMemoryToolRegistry,
    ) -> Self {
        Self {
            identity,
            system_prompt,
            memory,
            client,
            tools,
            options: CompletionOptions::default(),
        }
    }

    /// Default per-call options; the system prompt is always filled in
    /// from the agent.
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn memory(&self) -> &Arc<dyn Memory> {
        &self.memory
    }

    pub fn tools(&self) -> &InMemoryToolRegistry {
        &self.tools
    }

    pub fn manifest(&self) -> Manifest {
        self.tools.manifest(&self.identity.name)
    }

    /// Complete `prompt` against the agent's system prompt.
    pub async fn complete(&self, prompt: &str) -> AgentResult<String> {
        let options = self
            .options
            .clone()
            .with_system_prompt(self.system_prompt.as_str());

        tracing::debug!(
            agent = %self.identity.name,
            session_id = %self.identity.session_id,
            prompt_len = prompt.len(),
            "Requesting completion"
        );
        Ok(self.client.complete(prompt, &options).await?)
    }

    /// Invoke one of the agent's tools by name.
    pub fn invoke_tool(&self, name: &str, arguments: &serde_json::Value) -> AgentResult<String> {
        Ok(self.tools.invoke(name, arguments)?)
    }

    /// Handle one serialized [`ActionRequest`].
    ///
    /// The step's result is stored under `step:{plan_id}:{step_id}` and the
    /// serialized [`ActionResponse`] is returned.
    pub async fn handle_action_request(&self, raw: &str) -> AgentResult<String> {
        let request: ActionRequest = serde_json::from_str(raw)
            .map_err(|e| AgentError::InvalidRequest(format!("malformed action request: {e}")))?;
        let key = MemoryKey::new(&request.memory_key()).map_err(|e| {
            AgentError::InvalidRequest(format!("invalid step key '{}': {e}", request.memory_key()))
        })?;

        if let Some(target) = request.agent.as_deref() {
            if target != self.identity.name {
                tracing::warn!(
                    agent = %self.identity.name,
                    target = %target,
                    step_id = %request.step_id,
                    "Action request addressed to another agent"
                );
            }
        }

        tracing::info!(
            agent = %self.identity.name,
            plan_id = %request.plan_id,
            step_id = %request.step_id,
            tool = request.tool.as_deref().unwrap_or("-"),
            "Handling action request"
        );

        let result = match request.tool.as_deref() {
            Some(tool) => {
                let arguments = request
                    .arguments
                    .clone()
                    .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
                self.invoke_tool(tool, &arguments)?
            }
            None => self.complete(&request.action).await?,
        };

        let response = ActionResponse::completed(&request, &self.identity.name, result);
        let serialized = serde_json::to_string(&response)?;

        self.memory
            .store(MemoryUpdate::from_validated(key, serialized.clone()))?;

        Ok(serialized)
    }
}

impl std::fmt::Debug for BaseAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseAgent")
            .field("identity", &self.identity)
            .field("system_prompt_len", &self.system_prompt.len())
            .field("tools", &self.tools)
            .finish()
    }
}

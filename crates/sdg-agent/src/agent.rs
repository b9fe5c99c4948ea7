//! The SDG agent facade.

use async_trait::async_trait;
use sdg_core::{InMemoryMemory, Memory, Tool, ToolError};
use sdg_tools::{GOAL_COUNT, InMemoryToolRegistry, Manifest, goal_name};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::base::{AgentIdentity, BaseAgent};
use crate::completion::{CompletionClient, CompletionOptions};
use crate::config::{AgentSettings, ConfigError, select_system_prompt};
use crate::error::AgentResult;
use crate::prompts::{self, PromptPreset};
use crate::router::{Intent, IntentClassifier, KeywordRouter};

/// Behaviour shared by every agent in the orchestration.
#[async_trait]
pub trait Agent: Send + Sync {
    fn base(&self) -> &BaseAgent;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn system_prompt(&self) -> &str {
        self.base().system_prompt()
    }

    fn tools(&self) -> &InMemoryToolRegistry {
        self.base().tools()
    }

    /// Planner manifest for this agent's tools.
    fn manifest(&self) -> Manifest {
        self.base().manifest()
    }

    /// Handle a serialized orchestrator step.
    async fn handle_action_request(&self, raw: &str) -> AgentResult<String> {
        self.base().handle_action_request(raw).await
    }

    /// Answer a free-text message.
    async fn process_message(&self, message: &str) -> AgentResult<String>;
}

/// Output of one analysis operation, serialized with a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisResult {
    Analysis(String),
    Indicators(String),
    Agencies(String),
}

impl AnalysisResult {
    pub fn key(&self) -> &'static str {
        match self {
            AnalysisResult::Analysis(_) => "analysis",
            AnalysisResult::Indicators(_) => "indicators",
            AnalysisResult::Agencies(_) => "agencies",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            AnalysisResult::Analysis(text)
            | AnalysisResult::Indicators(text)
            | AnalysisResult::Agencies(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            AnalysisResult::Analysis(text)
            | AnalysisResult::Indicators(text)
            | AnalysisResult::Agencies(text) => text,
        }
    }
}

/// Agent specialised in the UN Sustainable Development Goals.
pub struct SdgAgent {
    base: BaseAgent,
    classifier: Arc<dyn IntentClassifier>,
}

impl SdgAgent {
    pub fn builder() -> SdgAgentBuilder {
        SdgAgentBuilder::default()
    }

    /// Build an agent from loaded settings and a completion client.
    pub fn from_settings(
        settings: &AgentSettings,
        client: Arc<dyn CompletionClient>,
    ) -> AgentResult<Self> {
        Self::builder().settings(settings).client(client).build()
    }

    /// Analyze how a project aligns with the goals, optionally focused on
    /// one goal.
    pub async fn analyze_sdg_alignment(
        &self,
        project_description: &str,
        sdg_number: Option<u8>,
    ) -> AgentResult<AnalysisResult> {
        if let Some(n) = sdg_number {
            if goal_name(n).is_none() {
                return Err(ToolError::InvalidArgument {
                    tool: "analyze_sdg_alignment".to_string(),
                    message: format!("sdg_number must be between 1 and {GOAL_COUNT}, got {n}"),
                }
                .into());
            }
        }

        tracing::info!(agent = %self.name(), sdg_number = ?sdg_number, "Analyzing SDG alignment");
        let prompt = prompts::alignment_instruction(project_description, sdg_number);
        let text = self.base.complete(&prompt).await?;
        Ok(AnalysisResult::Analysis(text))
    }

    /// Suggest SDG indicators for measuring a project's impact.
    pub async fn suggest_sdg_indicators(
        &self,
        project_description: &str,
    ) -> AgentResult<AnalysisResult> {
        tracing::info!(agent = %self.name(), "Suggesting SDG indicators");
        let prompt = prompts::indicators_instruction(project_description);
        let text = self.base.complete(&prompt).await?;
        Ok(AnalysisResult::Indicators(text))
    }

    /// Identify UN agencies relevant to an initiative.
    pub async fn identify_un_agencies(
        &self,
        initiative_description: &str,
    ) -> AgentResult<AnalysisResult> {
        tracing::info!(agent = %self.name(), "Identifying UN agencies");
        let prompt = prompts::agencies_instruction(initiative_description);
        let text = self.base.complete(&prompt).await?;
        Ok(AnalysisResult::Agencies(text))
    }

    pub fn classify(&self, message: &str) -> Intent {
        self.classifier.classify(message)
    }
}

#[async_trait]
impl Agent for SdgAgent {
    fn base(&self) -> &BaseAgent {
        &self.base
    }

    async fn process_message(&self, message: &str) -> AgentResult<String> {
        let intent = self.classify(message);
        tracing::debug!(agent = %self.name(), intent = %intent, "Routing message");

        let result = match intent {
            Intent::Alignment => self.analyze_sdg_alignment(message, None).await?,
            Intent::Indicators => self.suggest_sdg_indicators(message).await?,
            Intent::Agencies => self.identify_un_agencies(message).await?,
            Intent::General => return self.base.complete(message).await,
        };
        Ok(result.into_text())
    }
}

impl std::fmt::Debug for SdgAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdgAgent").field("base", &self.base).finish()
    }
}

/// Builder for [`SdgAgent`].
pub struct SdgAgentBuilder {
    identity: AgentIdentity,
    system_prompt: Option<String>,
    preset: Option<PromptPreset>,
    memory: Option<Arc<dyn Memory>>,
    client: Option<Arc<dyn CompletionClient>>,
    tools: Option<Vec<Arc<dyn Tool>>>,
    classifier: Option<Arc<dyn IntentClassifier>>,
    options: CompletionOptions,
}

impl Default for SdgAgentBuilder {
    fn default() -> Self {
        Self {
            identity: AgentIdentity::default(),
            system_prompt: None,
            preset: Some(PromptPreset::Full),
            memory: None,
            client: None,
            tools: None,
            classifier: None,
            options: CompletionOptions::default(),
        }
    }
}

impl SdgAgentBuilder {
    pub fn identity(mut self, identity: AgentIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.identity.name = name.into();
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.identity.session_id = session_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.identity.user_id = user_id.into();
        self
    }

    /// Replace the preset prompt. A blank override fails the build.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Built-in prompt used without an override; `None` disables it.
    pub fn preset(mut self, preset: Option<PromptPreset>) -> Self {
        self.preset = preset;
        self
    }

    pub fn memory(mut self, memory: Arc<dyn Memory>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Replace the SDG tool set.
    pub fn tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Take identity, prompt selection and call options from settings.
    pub fn settings(mut self, settings: &AgentSettings) -> Self {
        self.identity = AgentIdentity::new(
            &settings.agent.name,
            &settings.agent.session_id,
            &settings.agent.user_id,
        );
        self.preset = settings.agent.prompt_preset;
        self.system_prompt = settings.agent.system_prompt.clone();
        self.options.temperature = settings.completion.temperature;
        self.options.max_tokens = settings.completion.max_tokens;
        self
    }

    pub fn build(self) -> AgentResult<SdgAgent> {
        let system_prompt = select_system_prompt(self.system_prompt.as_deref(), self.preset)?;
        let client = self.client.ok_or(ConfigError::MissingCompletionClient)?;

        let tools = match self.tools {
            Some(tools) => InMemoryToolRegistry::from_tools(tools)?,
            None => sdg_tools::sdg_registry()?,
        };
        let memory = self
            .memory
            .unwrap_or_else(|| Arc::new(InMemoryMemory::new()));
        let classifier = self
            .classifier
            .unwrap_or_else(|| Arc::new(KeywordRouter::default()));

        tracing::info!(
            agent = %self.identity.name,
            session_id = %self.identity.session_id,
            tools = tools.len(),
            "Built SDG agent"
        );

        let base = BaseAgent::new(self.identity, system_prompt, memory, client, tools)
            .with_options(self.options);
        Ok(SdgAgent { base, classifier })
    }
}

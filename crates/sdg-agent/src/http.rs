//! OpenAI-compatible chat completion client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

use crate::completion::{CompletionClient, CompletionError, CompletionOptions};
use crate::config::{CompletionSection, ConfigError};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Calls `POST {endpoint}/chat/completions` and returns the first choice.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
    defaults: CompletionOptions,
}

impl HttpCompletionClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::ValidationError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: None,
            model: model.into(),
            timeout,
            defaults: CompletionOptions::default(),
        })
    }

    pub fn from_settings(settings: &CompletionSection) -> Result<Self, ConfigError> {
        let mut client = Self::new(&settings.endpoint, &settings.model, settings.timeout())?;
        client.api_key = settings.api_key.clone().filter(|key| !key.is_empty());
        client.defaults.temperature = settings.temperature;
        client.defaults.max_tokens = settings.max_tokens;
        Ok(client)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn classify_send_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout {
                after: self.timeout,
            }
        } else if err.is_connect() || err.is_request() {
            CompletionError::Transient {
                message: err.to_string(),
            }
        } else {
            CompletionError::Terminal {
                message: err.to_string(),
            }
        }
    }
}

fn classify_status(status: StatusCode, body: &str) -> CompletionError {
    let message = format!("API request failed with status {status}: {body}");
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        CompletionError::Transient { message }
    } else {
        CompletionError::Terminal { message }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = options.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let payload = ChatRequest {
            model: &self.model,
            messages,
            temperature: options.temperature.or(self.defaults.temperature),
            max_tokens: options.max_tokens.or(self.defaults.max_tokens),
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending completion request"
        );
        let response = request
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CompletionError::Terminal {
                message: format!("unreadable completion response: {e}"),
            })?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| CompletionError::Terminal {
                message: "completion response has no choices[0].message.content".to_string(),
            })
    }
}

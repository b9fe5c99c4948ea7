use async_trait::async_trait;
use sdg_agent::{CompletionClient, CompletionError, CompletionOptions};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// One call seen by a [`MockCompletionClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub options: CompletionOptions,
}

/// A completion client that answers from a script.
///
/// Queued failures are returned first, one per call. Otherwise the first
/// reply whose key occurs in the prompt wins, then the default reply, then
/// an echo of the prompt.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient {
    replies: Vec<(String, String)>,
    default_reply: Option<String>,
    failures: Arc<Mutex<VecDeque<CompletionError>>>,
    history: Arc<Mutex<Vec<RecordedCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` to any prompt containing `needle`.
    pub fn with_reply(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies.push((needle.into(), reply.into()));
        self
    }

    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }

    /// Queue a failure for the next unanswered call.
    pub fn with_failure(self, error: CompletionError) -> Self {
        self.push_failure(error);
        self
    }

    pub fn push_failure(&self, error: CompletionError) {
        lock(&self.failures).push_back(error);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.history).clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.history)
            .iter()
            .map(|call| call.prompt.clone())
            .collect()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.history).last().cloned()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.history).len()
    }

    pub fn reset(&self) {
        lock(&self.history).clear();
        lock(&self.failures).clear();
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        lock(&self.history).push(RecordedCall {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        if let Some(error) = lock(&self.failures).pop_front() {
            return Err(error);
        }

        let reply = self
            .replies
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.default_reply.clone())
            .unwrap_or_else(|| format!("Mock completion for: {prompt}"));
        Ok(reply)
    }
}

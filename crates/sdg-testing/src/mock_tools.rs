//! # Mock Tools for Testing
//!
//! Tools that return predictable responses and record how they were called.

use sdg_core::{ExecutionResult, ParamSpec, Tool};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock tool that returns predefined responses based on its raw input.
#[derive(Debug, Clone)]
pub struct MockTool {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    responses: HashMap<String, ExecutionResult>,
    default_response: Option<ExecutionResult>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            params: Vec::new(),
            responses: HashMap::new(),
            default_response: None,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Respond to an exact JSON argument document.
    pub fn with_response(
        mut self,
        arguments: &serde_json::Value,
        response: impl Into<String>,
    ) -> Self {
        self.responses.insert(
            arguments.to_string(),
            ExecutionResult::success(response.into()),
        );
        self
    }

    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = Some(ExecutionResult::success(response.into()));
        self
    }

    pub fn with_default_failure(mut self, error: impl Into<String>) -> Self {
        self.default_response = Some(ExecutionResult::failure(error.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.call_history).len()
    }

    pub fn call_history(&self) -> Vec<String> {
        lock(&self.call_history).clone()
    }
}

impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &[ParamSpec] {
        &self.params
    }

    fn call(&self, input: String) -> ExecutionResult {
        lock(&self.call_history).push(input.clone());

        if let Some(response) = self.responses.get(&input) {
            response.clone()
        } else if let Some(default) = &self.default_response {
            default.clone()
        } else {
            ExecutionResult::success(format!("Mock response for: {}", input))
        }
    }
}

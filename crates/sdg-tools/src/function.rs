use sdg_core::{ExecutionResult, ParamSpec, Tool};

type Handler = Box<dyn Fn(String) -> ExecutionResult + Send + Sync>;

/// A tool whose behaviour is a closure, declared with a builder.
///
/// Useful for tool list overrides and for agents whose tools need no state
/// of their own.
pub struct FnTool {
    name: String,
    description: String,
    documentation: String,
    params: Vec<ParamSpec>,
    handler: Handler,
}

impl FnTool {
    pub fn builder(name: impl Into<String>) -> FnToolBuilder {
        FnToolBuilder {
            name: name.into(),
            description: String::new(),
            documentation: String::new(),
            params: Vec::new(),
        }
    }
}

impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn documentation(&self) -> &str {
        &self.documentation
    }

    fn parameters(&self) -> &[ParamSpec] {
        &self.params
    }

    fn call(&self, input: String) -> ExecutionResult {
        (self.handler)(input)
    }
}

/// Builder for [`FnTool`].
pub struct FnToolBuilder {
    name: String,
    description: String,
    documentation: String,
    params: Vec<ParamSpec>,
}

impl FnToolBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Append a parameter; parameters keep the order they are added in.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Finish the tool with its handler.
    pub fn handler<F>(self, handler: F) -> FnTool
    where
        F: Fn(String) -> ExecutionResult + Send + Sync + 'static,
    {
        FnTool {
            name: self.name,
            description: self.description,
            documentation: self.documentation,
            params: self.params,
            handler: Box::new(handler),
        }
    }
}

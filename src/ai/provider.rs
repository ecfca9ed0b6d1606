use async_trait::async_trait;
use serde_json::Value;

use super::error::ProviderError;

/// One completion call: an opaque prompt plus optional generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub contents: Value,
    pub config: Option<Value>,
}

impl CompletionRequest {
    pub fn new(contents: Value, config: Option<Value>) -> Self {
        Self { contents, config }
    }

    // Plain text prompt with no generation options.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::new(Value::String(prompt.into()), None)
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Performs exactly one downstream call and returns the extracted text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
    fn name(&self) -> &str;
    fn model(&self) -> &str;
}

use async_trait::async_trait;
use scout_common::Result;

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub tokens_used: Option<u32>,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a response to the given prompt with optional system prompt
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse>;

    /// Get the model name being used
    fn model_name(&self) -> &str;
}

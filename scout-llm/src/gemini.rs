use crate::traits::{LlmClient, LlmResponse};
use async_trait::async_trait;
use scout_common::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    total_token_count: Option<u32>,
}

/// Google Gemini `generateContent` client.
///
/// Requires a valid API key and internet access.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client using the provided API key and model.
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ScoutError::Config("Gemini API key is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ScoutError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        })
    }

    /// Point the client at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<LlmResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let generation_config = if max_tokens.is_some() || temperature.is_some() {
            Some(GeminiGenerationConfig {
                temperature,
                max_output_tokens: max_tokens,
            })
        } else {
            None
        };

        let system_instruction = system_prompt.map(|sys_prompt| GeminiContent {
            parts: vec![GeminiPart {
                text: sys_prompt.to_string(),
            }],
        });

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
            system_instruction,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "gemini.request.start"
        );

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScoutError::Timeout
                } else {
                    // reqwest errors embed the URL, which carries the key.
                    ScoutError::Provider(format!("Gemini request failed: {}", e.without_url()))
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %error_text, "gemini.response.error");

            return Err(match status.as_u16() {
                429 => ScoutError::Provider("Rate limit exceeded".to_string()),
                401 => ScoutError::Provider("Invalid API key".to_string()),
                403 => ScoutError::Provider("API access forbidden".to_string()),
                _ => ScoutError::Provider(format!("Gemini API error ({}): {}", status, error_text)),
            });
        }

        let gemini_response: GeminiResponse = resp.json().await.map_err(|e| {
            ScoutError::Provider(format!(
                "Failed to parse Gemini response: {}",
                e.without_url()
            ))
        })?;

        let Some(candidate) = gemini_response.candidates.into_iter().next() else {
            return Err(ScoutError::Provider(
                "No candidates returned from Gemini".to_string(),
            ));
        };

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ScoutError::Provider(
                "Content blocked by Gemini safety filters".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ScoutError::Provider(format!(
                "No text in Gemini response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        let tokens_used = gemini_response
            .usage_metadata
            .and_then(|u| u.total_token_count);
        tracing::debug!(model = %self.model, ?tokens_used, chars = text.len(), "gemini.response.ok");

        Ok(LlmResponse {
            text,
            tokens_used,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

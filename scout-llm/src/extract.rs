//! Turning raw model output into lead records.
//!
//! Models sometimes wrap JSON in a markdown code block even when told not to.
//! [`strip_code_fence`] removes at most one leading fence (with an optional
//! language tag) and at most one trailing fence; [`parse_leads`] then expects
//! a JSON array of lead objects and reports anything else as a typed
//! [`ExtractionError`].

use std::sync::Arc;
use std::time::Instant;

use scout_common::{Lead, LeadCriteria, ScoutError};

use crate::prompt::build_extraction_prompt;
use crate::traits::LlmClient;

const FENCE: &str = "```";
const SNIPPET_CHARS: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("model call failed: {0}")]
    Llm(#[from] ScoutError),

    #[error("model returned an empty response")]
    Empty,

    #[error("model output is not a JSON lead array: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
        snippet: String,
    },

    #[error("expected {expected} leads, model returned {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// Strip one optional leading fence (```` ``` ```` or ```` ```json ````) and one
/// optional trailing fence, then trim.
///
/// ```
/// use scout_llm::extract::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n[1]\n```"), "[1]");
/// assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
/// assert_eq!(strip_code_fence("  [1] "), "[1]");
/// ```
pub fn strip_code_fence(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(rest.len());
        s = &rest[tag_len..];
    }
    if let Some(rest) = s.strip_suffix(FENCE) {
        s = rest;
    }
    s.trim()
}

/// Fence-strip and parse a model response into leads.
pub fn parse_leads(raw: &str) -> Result<Vec<Lead>, ExtractionError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ExtractionError::Empty);
    }
    serde_json::from_str::<Vec<Lead>>(body).map_err(|source| ExtractionError::Malformed {
        source,
        snippet: body.chars().take(SNIPPET_CHARS).collect(),
    })
}

/// Knobs for the extraction call.
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub expected_leads: usize,
    /// Reject responses whose lead count differs from `expected_leads`.
    pub strict_count: bool,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            expected_leads: 10,
            strict_count: false,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

pub struct LeadExtractor {
    llm: Arc<dyn LlmClient>,
    settings: ExtractionSettings,
}

impl LeadExtractor {
    pub fn new(llm: Arc<dyn LlmClient>, settings: ExtractionSettings) -> Self {
        Self { llm, settings }
    }

    pub async fn extract(
        &self,
        digest: &str,
        criteria: &LeadCriteria,
    ) -> Result<Vec<Lead>, ExtractionError> {
        let prompt = build_extraction_prompt(digest, criteria, self.settings.expected_leads);
        let started = Instant::now();
        tracing::info!(
            target: "llm.extract",
            model = self.llm.model_name(),
            prompt_chars = prompt.len(),
            "extract.start"
        );

        let response = self
            .llm
            .generate(
                &prompt,
                None,
                self.settings.max_output_tokens,
                self.settings.temperature,
            )
            .await?;

        let leads = match parse_leads(&response.text) {
            Ok(leads) => leads,
            Err(e) => {
                let snippet = match &e {
                    ExtractionError::Malformed { snippet, .. } => snippet.as_str(),
                    _ => "",
                };
                tracing::error!(
                    target: "llm.extract",
                    error = %e,
                    snippet = %snippet,
                    "extract.parse_failed"
                );
                return Err(e);
            }
        };

        for lead in &leads {
            let missing = lead.missing_columns();
            if !missing.is_empty() {
                tracing::warn!(
                    target: "llm.extract",
                    company = lead.company_name.as_deref().unwrap_or("-"),
                    missing = ?missing.iter().map(|c| c.header()).collect::<Vec<_>>(),
                    "extract.incomplete_lead"
                );
            }
        }

        if leads.len() != self.settings.expected_leads {
            if self.settings.strict_count {
                tracing::error!(
                    target: "llm.extract",
                    expected = self.settings.expected_leads,
                    actual = leads.len(),
                    "extract.wrong_count"
                );
                return Err(ExtractionError::WrongCount {
                    expected: self.settings.expected_leads,
                    actual: leads.len(),
                });
            }
            tracing::warn!(
                target: "llm.extract",
                expected = self.settings.expected_leads,
                actual = leads.len(),
                "extract.unexpected_count"
            );
        }

        tracing::info!(
            target: "llm.extract",
            lead_count = leads.len(),
            tokens_used = ?response.tokens_used,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "extract.success"
        );
        Ok(leads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: &str = r#"[{"Bedrijfsnaam": "Acme BV", "Website URL": "https://acme.nl"}]"#;

    #[test]
    fn fenced_and_bare_responses_parse_identically() {
        let bare = parse_leads(ARRAY).unwrap();
        let json_fenced = parse_leads(&format!("```json\n{ARRAY}\n```")).unwrap();
        let plain_fenced = parse_leads(&format!("```\n{ARRAY}\n```")).unwrap();
        let upper_tag = parse_leads(&format!("```JSON\n{ARRAY}```")).unwrap();

        assert_eq!(bare, json_fenced);
        assert_eq!(bare, plain_fenced);
        assert_eq!(bare, upper_tag);
        assert_eq!(bare[0].company_name.as_deref(), Some("Acme BV"));
    }

    #[test]
    fn only_one_fence_is_stripped_per_side() {
        assert_eq!(strip_code_fence("``````[]``````"), "```[]```");
    }

    #[test]
    fn inner_backticks_survive() {
        let raw = "```json\n[{\"AI-Matching\": \"gebruikt ```code``` in tekst\"}]\n```";
        let leads = parse_leads(raw).unwrap();
        assert_eq!(
            leads[0].rationale.as_deref(),
            Some("gebruikt ```code``` in tekst")
        );
    }

    #[test]
    fn prose_is_malformed_not_a_panic() {
        let err = parse_leads("Helaas, ik kon geen leads vinden.").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed { .. }));
    }

    #[test]
    fn object_instead_of_array_is_malformed() {
        let err = parse_leads(r#"{"Bedrijfsnaam": "Acme"}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed { .. }));
    }

    #[test]
    fn fence_only_response_is_empty() {
        assert!(matches!(parse_leads("```json\n```"), Err(ExtractionError::Empty)));
        assert!(matches!(parse_leads("   "), Err(ExtractionError::Empty)));
    }

    #[test]
    fn empty_array_parses_to_no_leads() {
        assert!(parse_leads("[]").unwrap().is_empty());
    }
}

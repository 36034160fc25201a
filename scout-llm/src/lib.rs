//! LLM integration for lead extraction.
//!
//! This crate exposes a provider-agnostic [`traits::LlmClient`] interface, the
//! Google Gemini implementation, and the [`extract::LeadExtractor`] that turns
//! a search digest into structured [`scout_common::Lead`] records.
//!
//! # Examples
//! ```no_run
//! use std::sync::Arc;
//! use scout_common::LeadCriteria;
//! use scout_llm::{gemini::GeminiClient, extract::{ExtractionSettings, LeadExtractor}};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("key".into(), scout_llm::DEFAULT_GEMINI_MODEL.into())?;
//! let extractor = LeadExtractor::new(Arc::new(client), ExtractionSettings::default());
//! let leads = extractor
//!     .extract("--- Resultaat 1 ---", &LeadCriteria::new("bouw", "Utrecht", ""))
//!     .await?;
//! println!("{} leads", leads.len());
//! # Ok(())
//! # }
//! ```
pub mod extract;
pub mod gemini;
pub mod prompt;
pub mod traits;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

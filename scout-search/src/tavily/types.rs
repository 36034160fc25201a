use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{SearchError, SearchHit};

/// Tavily search depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl FromStr for SearchDepth {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            other => Err(SearchError::Config(format!(
                "unknown search depth '{other}', expected 'basic' or 'advanced'"
            ))),
        }
    }
}

/// Request body for `POST /search`.
#[derive(Debug, Serialize)]
pub(crate) struct TavilyRequest<'a> {
    pub api_key: &'a str,
    pub query: &'a str,
    pub search_depth: SearchDepth,
    pub include_answer: bool,
    pub include_images: bool,
    pub include_raw_content: bool,
    pub max_results: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TavilyResponse {
    #[serde(default)]
    pub results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TavilyResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<TavilyResult> for SearchHit {
    fn from(r: TavilyResult) -> Self {
        SearchHit {
            title: r.title.unwrap_or_default(),
            url: r.url.unwrap_or_default(),
            content: r.content.unwrap_or_default(),
        }
    }
}

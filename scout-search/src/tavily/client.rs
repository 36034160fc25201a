use std::time::{Duration, Instant};

use async_trait::async_trait;
use scout_http::HttpClient;

use super::types::{SearchDepth, TavilyRequest, TavilyResponse};
use crate::{SearchError, SearchHit, SearchProvider};

pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Fixed request parameters for every Tavily call.
#[derive(Debug, Clone)]
pub struct TavilyOptions {
    pub endpoint: String,
    pub max_results: u32,
    pub search_depth: SearchDepth,
    pub timeout: Duration,
    pub retries: usize,
}

impl Default for TavilyOptions {
    fn default() -> Self {
        Self {
            endpoint: TAVILY_BASE_URL.to_string(),
            max_results: 40,
            search_depth: SearchDepth::Advanced,
            timeout: Duration::from_secs(30),
            retries: 0,
        }
    }
}

/// Minimal client for the Tavily Search API.
#[derive(Clone)]
pub struct TavilyClient {
    http: HttpClient,
    api_key: String,
    options: TavilyOptions,
}

impl TavilyClient {
    pub fn new(api_key: String, options: TavilyOptions) -> Result<Self, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::Config("Tavily API key is empty".into()));
        }
        let http = HttpClient::new(&options.endpoint)?
            .with_timeout(options.timeout)
            .with_retries(options.retries);
        Ok(Self {
            http,
            api_key,
            options,
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let request = TavilyRequest {
            api_key: &self.api_key,
            query,
            search_depth: self.options.search_depth,
            include_answer: false,
            include_images: false,
            include_raw_content: false,
            max_results: self.options.max_results,
        };

        let started = Instant::now();
        tracing::info!(
            target: "search.tavily",
            query = %query,
            max_results = self.options.max_results,
            "tavily.search.start"
        );

        let resp: TavilyResponse = match self.http.post_json("search", &request).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(
                    target: "search.tavily",
                    status = ?e.status(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "tavily.search.error"
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            target: "search.tavily",
            result_count = resp.results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tavily.search.success"
        );

        Ok(resp.results.into_iter().map(SearchHit::from).collect())
    }

    fn name(&self) -> &str {
        "tavily"
    }
}

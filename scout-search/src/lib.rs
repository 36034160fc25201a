//! Web discovery for lead generation.
//!
//! - [`SearchProvider`]: the seam every search backend implements
//! - Tavily Search API client (`tavily`)
//! - Query building and the plain-text digest handed to the extractor
//!   (`searcher`, `digest`)

pub mod digest;
pub mod searcher;
pub mod tavily;

use async_trait::async_trait;
use scout_http::HttpError;

pub use digest::SearchDigest;
pub use searcher::{build_query, LeadSearcher};
pub use tavily::{SearchDepth, TavilyClient, TavilyOptions};

/// One search hit, reduced to what the digest needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] HttpError),

    #[error("search configuration error: {0}")]
    Config(String),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a single query and return every hit the backend produced.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

//! Tavily Search API (`POST /search`).

pub mod client;
pub mod types;

pub use client::{TavilyClient, TavilyOptions};
pub use types::SearchDepth;

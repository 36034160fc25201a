use std::sync::Arc;
use std::time::Instant;

use scout_common::LeadCriteria;

use crate::{SearchDigest, SearchError, SearchProvider};

/// Turn the requester's criteria into one natural-language query.
///
/// ```
/// use scout_common::LeadCriteria;
/// use scout_search::build_query;
///
/// let q = build_query(&LeadCriteria::new("bouw", "Gelderland", "Minimaal 20 medewerkers"));
/// assert_eq!(q, "Bedrijven in de bouw gevestigd in Gelderland. Minimaal 20 medewerkers");
/// ```
pub fn build_query(criteria: &LeadCriteria) -> String {
    format!(
        "Bedrijven in de {} gevestigd in {}. {}",
        criteria.sector.trim(),
        criteria.region.trim(),
        criteria.extra.trim()
    )
    .trim_end()
    .to_string()
}

/// Query builder plus provider call, producing the digest for the extractor.
pub struct LeadSearcher {
    provider: Arc<dyn SearchProvider>,
}

impl LeadSearcher {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    pub async fn search(&self, criteria: &LeadCriteria) -> Result<SearchDigest, SearchError> {
        let query = build_query(criteria);
        let started = Instant::now();
        tracing::info!(
            target: "search",
            provider = self.provider.name(),
            sector = %criteria.sector,
            region = %criteria.region,
            "search.start"
        );

        let hits = self.provider.search(&query).await.map_err(|e| {
            tracing::warn!(
                target: "search",
                provider = self.provider.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "search.failed"
            );
            e
        })?;

        tracing::info!(
            target: "search",
            provider = self.provider.name(),
            hit_count = hits.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search.success"
        );

        Ok(SearchDigest::from_hits(&hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_extra_criteria_leaves_no_trailing_space() {
        let q = build_query(&LeadCriteria::new("IT-diensten", "Utrecht", ""));
        assert_eq!(q, "Bedrijven in de IT-diensten gevestigd in Utrecht.");
    }

    #[test]
    fn all_empty_criteria_still_produce_a_query() {
        let q = build_query(&LeadCriteria::default());
        assert_eq!(q, "Bedrijven in de  gevestigd in .");
    }
}

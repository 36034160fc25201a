use crate::SearchHit;

/// Concatenated plain-text rendering of all search hits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchDigest {
    text: String,
    hit_count: usize,
}

impl SearchDigest {
    pub fn from_hits(hits: &[SearchHit]) -> Self {
        let text = hits
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                format!(
                    "\n\n--- Resultaat {} ---\nTitel: {}\nURL: {}\nInhoud: {}",
                    i + 1,
                    hit.title,
                    hit.url,
                    hit.content
                )
            })
            .collect::<String>();

        Self {
            text,
            hit_count: hits.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

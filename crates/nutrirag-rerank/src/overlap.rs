use std::collections::HashSet;

use anyhow::Result;

use nutrirag_core::traits::CrossEncoder;

/// Term-overlap scorer standing in for the cross-encoder in tests and
/// offline development: fraction of query terms present in the passage.
pub struct OverlapScorer;

impl CrossEncoder for OverlapScorer {
    fn score_batch(&self, query: &str, texts: &[&str]) -> Result<Vec<f32>> {
        let query_lower = query.to_lowercase();
        let query_terms: HashSet<&str> = query_lower.split_whitespace().collect();
        Ok(texts
            .iter()
            .map(|text| {
                let text_lower = text.to_lowercase();
                let text_terms: HashSet<&str> = text_lower.split_whitespace().collect();
                let overlap = query_terms.intersection(&text_terms).count();
                overlap as f32 / query_terms.len().max(1) as f32
            })
            .collect())
    }
}

use std::collections::HashSet;

use nutrirag_core::corpus::CorpusStore;
use nutrirag_core::types::{Candidate, PassageId};

/// Merge dense and sparse id sequences into the rerank candidate pool.
///
/// Concatenation order is fixed dense-then-sparse; an id surfaced by both
/// searches keeps its dense-list position. `sparse_scores` is the
/// whole-corpus score table (ascending id); the matched score rides along
/// on each candidate as a diagnostic and plays no part in the final order.
pub fn build_pool(
    dense_ids: &[PassageId],
    sparse_ids: &[PassageId],
    sparse_scores: &[(PassageId, f32)],
    corpus: &CorpusStore,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();
    for &id in dense_ids.iter().chain(sparse_ids.iter()) {
        if !seen.insert(id) {
            continue;
        }
        let lexical_score = sparse_scores.get(id).map_or(0.0, |&(_, score)| score);
        pool.push(Candidate {
            id,
            text: corpus.text_at(id).to_string(),
            locator: corpus.locator_at(id).map(str::to_string),
            lexical_score,
        });
    }
    pool
}

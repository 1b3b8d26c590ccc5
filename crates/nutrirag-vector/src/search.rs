use std::sync::Arc;

use anyhow::Result;

use nutrirag_core::corpus::{l2_normalize, CorpusStore};
use nutrirag_core::traits::VectorIndex;
use nutrirag_core::types::PassageId;

/// Flat (exhaustive) index over the store's normalized embeddings.
///
/// Similarity is the dot product, which equals cosine similarity after
/// normalization and orders identically to squared-Euclidean distance.
/// Ties resolve to ascending passage id.
pub struct FlatIndex {
    corpus: Arc<CorpusStore>,
}

impl FlatIndex {
    pub fn new(corpus: Arc<CorpusStore>) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &Arc<CorpusStore> {
        &self.corpus
    }
}

impl VectorIndex for FlatIndex {
    fn top_n(&self, query_vec: &[f32], n: usize) -> Result<Vec<PassageId>> {
        if self.corpus.is_empty() || n == 0 {
            return Ok(Vec::new());
        }
        anyhow::ensure!(
            query_vec.len() == self.corpus.dim(),
            "query dim {} does not match corpus dim {}",
            query_vec.len(),
            self.corpus.dim()
        );
        let mut query = query_vec.to_vec();
        l2_normalize(&mut query);

        let mut scored: Vec<(PassageId, f32)> = self
            .corpus
            .embedding_matrix()
            .iter()
            .enumerate()
            .map(|(id, row)| (id, dot(&query, row)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(n);
        tracing::debug!(requested = n, returned = scored.len(), "dense search");
        Ok(scored.into_iter().map(|(id, _)| id).collect())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

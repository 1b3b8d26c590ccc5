use crate::types::{PassageId, RankedResult};

/// Turns text into a fixed-length L2-normalized vector. Query vectors must
/// go through the same normalization as the corpus embeddings.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Whole-corpus lexical relevance scoring over tokenized queries.
pub trait LexicalIndex: Send + Sync {
    /// One `(id, score)` per corpus passage, ascending id.
    fn score_all(&self, query_tokens: &[String]) -> Vec<(PassageId, f32)>;
    /// The `n` highest-scoring ids; ties broken by ascending id.
    fn top_n(&self, query_tokens: &[String], n: usize) -> Vec<PassageId>;
}

/// Nearest-neighbor search over the corpus embedding matrix.
pub trait VectorIndex: Send + Sync {
    /// Ids of the `n` most similar passages (fewer on small corpora);
    /// ties broken by ascending id.
    fn top_n(&self, query_vec: &[f32], n: usize) -> anyhow::Result<Vec<PassageId>>;
}

/// Joint (query, passage) relevance scoring. Sole determinant of the final
/// ranking; runs once per retrieve call over the pooled candidates.
pub trait CrossEncoder: Send + Sync {
    /// One score per text, in input order. Higher is more relevant.
    fn score_batch(&self, query: &str, texts: &[&str]) -> anyhow::Result<Vec<f32>>;
}

/// The narrow surface the agent layer consumes.
pub trait Retriever: Send + Sync {
    fn retrieve(&self, query: &str, top_k: usize) -> anyhow::Result<Vec<RankedResult>>;
}

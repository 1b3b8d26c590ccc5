//! Domain types shared by the index crates and the retrieval facade.

use serde::{Deserialize, Serialize};

/// Position of a passage in the corpus. Ids are dense: `0..corpus.count()`.
pub type PassageId = usize;

/// A chunk of source content that is independently retrievable.
///
/// - `text`: the chunk payload (non-empty)
/// - `locator`: provenance label (page number as printed in the source
///   table, or `None`). Display-only; never a key back into the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub text: String,
    pub locator: Option<String>,
}

/// A pooled candidate awaiting reranking.
///
/// `lexical_score` is the BM25 score the passage had for this query (0.0 if
/// it only surfaced through dense search). Diagnostic only; the final order
/// comes from the cross-encoder alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: PassageId,
    pub text: String,
    pub locator: Option<String>,
    pub lexical_score: f32,
}

/// One entry of the final ranked list returned by `retrieve`.
///
/// `score` is the cross-encoder relevance score; higher is more relevant,
/// no fixed range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub text: String,
    pub locator: Option<String>,
    pub score: f32,
}

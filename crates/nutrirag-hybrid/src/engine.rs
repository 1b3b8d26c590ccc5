use std::sync::Arc;

use anyhow::Result;

use nutrirag_core::config::Settings;
use nutrirag_core::corpus::CorpusStore;
use nutrirag_core::error::Error;
use nutrirag_core::traits::{CrossEncoder, Embedder, LexicalIndex, Retriever, VectorIndex};
use nutrirag_core::types::RankedResult;
use nutrirag_text::{tokenize, Bm25Index};
use nutrirag_vector::FlatIndex;

use crate::pool::build_pool;

/// Facade tuning knobs. `pool_size` is the per-index top-N fed into the
/// pool; `confidence_cutoff` is the optional recall guard: when set and the
/// best rerank score falls below it, the whole result list is dropped
/// (empty success, "no grounding available").
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub pool_size: usize,
    pub confidence_cutoff: Option<f32>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { pool_size: 30, confidence_cutoff: None }
    }
}

/// The retrieval facade. Stateless across calls; all mutable work lives in
/// per-call locals. The embedder and cross-encoder are injected at
/// construction time.
pub struct RetrievalEngine<L, V>
where
    L: LexicalIndex,
    V: VectorIndex,
{
    corpus: Arc<CorpusStore>,
    lexical: L,
    vector: V,
    embedder: Box<dyn Embedder>,
    cross_encoder: Box<dyn CrossEncoder>,
    options: EngineOptions,
}

impl<L, V> RetrievalEngine<L, V>
where
    L: LexicalIndex,
    V: VectorIndex,
{
    pub fn new(
        corpus: Arc<CorpusStore>,
        lexical: L,
        vector: V,
        embedder: Box<dyn Embedder>,
        cross_encoder: Box<dyn CrossEncoder>,
    ) -> Self {
        Self { corpus, lexical, vector, embedder, cross_encoder, options: EngineOptions::default() }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn corpus(&self) -> &Arc<CorpusStore> {
        &self.corpus
    }

    /// Run the full pipeline for one query: dense + sparse search, pool and
    /// dedup, cross-encoder rerank, truncate to `top_k`.
    ///
    /// An empty result list is a valid outcome (degenerate corpus or the
    /// configured cutoff firing); errors mean a stage actually failed.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RankedResult>> {
        if top_k < 1 {
            return Err(Error::InvalidQuery(format!("top_k must be >= 1, got {top_k}")).into());
        }

        let query_vec = self
            .embedder
            .embed(query)
            .map_err(|e| Error::ModelUnavailable(format!("query embedding: {e}")))?;
        let dense_ids = self.vector.top_n(&query_vec, self.options.pool_size)?;

        let query_tokens = tokenize(query);
        let sparse_scores = self.lexical.score_all(&query_tokens);
        let sparse_ids = self.lexical.top_n(&query_tokens, self.options.pool_size);

        let pool = build_pool(&dense_ids, &sparse_ids, &sparse_scores, &self.corpus);
        tracing::debug!(
            dense = dense_ids.len(),
            sparse = sparse_ids.len(),
            pooled = pool.len(),
            "candidate pool built"
        );
        if pool.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = pool.iter().map(|c| c.text.as_str()).collect();
        let scores = self
            .cross_encoder
            .score_batch(query, &texts)
            .map_err(|e| Error::ModelUnavailable(format!("cross-encoder: {e}")))?;
        anyhow::ensure!(
            scores.len() == pool.len(),
            "cross-encoder returned {} scores for {} candidates",
            scores.len(),
            pool.len()
        );

        let mut ranked: Vec<RankedResult> = pool
            .into_iter()
            .zip(scores)
            .map(|(c, score)| RankedResult { text: c.text, locator: c.locator, score })
            .collect();
        // Stable sort: equal scores keep their pool order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_k);

        if let Some(cutoff) = self.options.confidence_cutoff {
            if ranked.first().is_some_and(|r| r.score < cutoff) {
                tracing::debug!(cutoff, "best rerank score below cutoff, returning no grounding");
                return Ok(Vec::new());
            }
        }
        Ok(ranked)
    }
}

impl<L, V> Retriever for RetrievalEngine<L, V>
where
    L: LexicalIndex,
    V: VectorIndex,
{
    fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RankedResult>> {
        Self::retrieve(self, query, top_k)
    }
}

/// Assemble the default engine from settings: CSV corpus, BM25 + flat
/// indexes over it, and the configured (or env-selected) models.
pub fn open(settings: &Settings) -> Result<RetrievalEngine<Bm25Index, FlatIndex>> {
    let corpus = Arc::new(CorpusStore::from_csv_path(&settings.corpus_path)?);
    let lexical = Bm25Index::build(Arc::clone(&corpus));
    let vector = FlatIndex::new(Arc::clone(&corpus));
    let embedder: Box<dyn Embedder> = match &settings.embed_model_dir {
        Some(dir) => Box::new(nutrirag_embed::BertEmbedder::new(dir)?),
        None => nutrirag_embed::get_default_embedder()?,
    };
    let cross_encoder: Box<dyn CrossEncoder> = match &settings.rerank_model_dir {
        Some(dir) => Box::new(nutrirag_rerank::CrossEncoderModel::new(dir)?),
        None => nutrirag_rerank::get_default_cross_encoder()?,
    };
    Ok(RetrievalEngine::new(corpus, lexical, vector, embedder, cross_encoder).with_options(
        EngineOptions {
            pool_size: settings.pool_size,
            confidence_cutoff: settings.confidence_cutoff,
        },
    ))
}

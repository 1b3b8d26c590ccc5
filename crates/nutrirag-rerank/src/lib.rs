//! nutrirag-rerank
//!
//! Cross-encoder scoring of (query, passage) pairs: a candle BERT
//! sequence-classification head for real serving and a term-overlap scorer
//! for tests (selected via `APP_USE_FAKE_RERANKER`).

use anyhow::Result;

pub mod model;
pub mod overlap;

pub use model::CrossEncoderModel;
pub use nutrirag_core::traits::CrossEncoder;
pub use overlap::OverlapScorer;

pub fn get_default_cross_encoder() -> Result<Box<dyn CrossEncoder>> {
    let use_fake = std::env::var("APP_USE_FAKE_RERANKER")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!("using overlap scorer");
        return Ok(Box::new(OverlapScorer));
    }
    let dir = nutrirag_embed::resolve_model_dir("APP_RERANK_MODEL_DIR", "models/ms-marco-minilm-l-6-v2")?;
    Ok(Box::new(CrossEncoderModel::new(&dir)?))
}

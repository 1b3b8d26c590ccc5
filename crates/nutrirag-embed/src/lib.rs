//! nutrirag-embed
//!
//! Query embedders: a candle BERT bi-encoder for real serving and a
//! deterministic hash embedder for tests (selected via
//! `APP_USE_FAKE_EMBEDDINGS`).

use std::path::PathBuf;

use anyhow::Result;

pub mod device;
pub mod hash;
pub mod model;
pub mod pool;

pub use hash::HashEmbedder;
pub use model::BertEmbedder;
pub use nutrirag_core::traits::Embedder;

/// Output width of the default embedding checkpoint (bge-large class).
pub const DEFAULT_EMBED_DIM: usize = 1024;

pub fn get_default_embedder() -> Result<Box<dyn Embedder>> {
    if env_flag("APP_USE_FAKE_EMBEDDINGS") {
        tracing::info!("using hash embedder");
        return Ok(Box::new(HashEmbedder::new(DEFAULT_EMBED_DIM)));
    }
    let dir = resolve_model_dir("APP_EMBED_MODEL_DIR", "models/bge-large-en-v1.5")?;
    Ok(Box::new(BertEmbedder::new(&dir)?))
}

/// Model dir resolution: explicit env override first, then the repo-relative
/// default. A set-but-missing override is an error rather than a silent
/// fallback.
pub fn resolve_model_dir(env_key: &str, default_dir: &str) -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(env_key) {
        let p = PathBuf::from(&dir);
        if p.exists() {
            return Ok(p);
        }
        anyhow::bail!("{env_key} points to missing directory {}", p.display());
    }
    let p = PathBuf::from(default_dir);
    if p.exists() {
        return Ok(p);
    }
    anyhow::bail!("could not locate model directory {default_dir} (set {env_key})")
}

pub(crate) fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

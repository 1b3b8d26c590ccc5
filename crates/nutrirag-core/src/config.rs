//! Configuration loader.
//!
//! Uses Figment to merge built-in defaults, `config.toml`,
//! `config.<env>.toml` (selected by `RUST_ENV`), and `APP_*` env vars,
//! extracted into one typed settings struct.

use std::env;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Engine settings. `pool_size` is the per-index top-N fed into the
/// candidate pool; `top_k` is the default result count; `confidence_cutoff`
/// is the optional recall guard on the best rerank score (off by default:
/// results are returned regardless of absolute score).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub corpus_path: PathBuf,
    pub pool_size: usize,
    pub top_k: usize,
    pub confidence_cutoff: Option<f32>,
    pub embed_model_dir: Option<PathBuf>,
    pub rerank_model_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("data/embeddings.csv"),
            pool_size: 30,
            top_k: 10,
            confidence_cutoff: None,
            embed_model_dir: None,
            rerank_model_dir: None,
        }
    }
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        let settings: Settings = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("failed to load settings: {e}"))?;
        if settings.pool_size == 0 {
            anyhow::bail!("pool_size must be at least 1");
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_pipeline() {
        let s = Settings::default();
        assert_eq!(s.pool_size, 30);
        assert_eq!(s.top_k, 10);
        assert!(s.confidence_cutoff.is_none());
    }
}

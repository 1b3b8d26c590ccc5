//! nutrirag-hybrid
//!
//! The retrieval facade: one `retrieve(query, top_k)` entry point that runs
//! dense and sparse search over the corpus, pools and dedups the candidates,
//! and lets the cross-encoder decide the final order.

pub mod engine;
pub mod pool;

pub use engine::{open, EngineOptions, RetrievalEngine};
pub use pool::build_pool;

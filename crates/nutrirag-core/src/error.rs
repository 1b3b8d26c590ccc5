use thiserror::Error;

/// Failure taxonomy of the retrieval engine.
///
/// `CorpusLoad` is fatal at construction time; the other two surface per
/// call. An empty result list is not an error anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus load failed: {0}")]
    CorpusLoad(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;

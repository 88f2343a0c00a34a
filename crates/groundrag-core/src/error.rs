use thiserror::Error;

/// Failure modes that may end a request or stop startup.
///
/// Generation failures are recovered inside the engine and never reach a
/// caller; a relevance refusal is an ordinary `Answer`, not an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corpus load failed: {0}")]
    Load(String),

    #[error("Query embedding failed: {0}")]
    Embedding(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

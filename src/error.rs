use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced outside the frame loop (startup and configuration)
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// The only failure the window registry models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Every regular slot is taken; the overflow notice was shown instead
    #[error("out of window slots")]
    OutOfSlots,
}

// File: src/errors.rs
use thiserror::Error;

/// Raised by word normalization when the input cannot become a valid
/// dictionary key. Batch callers skip the offending item rather than abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidWordError {
    #[error("word is empty or whitespace-only")]
    Empty,
    #[error("word contains interior whitespace: {0:?}")]
    ContainsWhitespace(String),
}

/// Failures at the durability boundary. Never fatal to the in-memory store:
/// load failures fall back to the core seed, save failures are retried on
/// the next flush signal.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("dictionary I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("dictionary encoding failed: {0}")]
    Codec(#[from] bincode::Error),
}

//! Error types for wordtrie

use thiserror::Error;

/// Result type alias for wordtrie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wordtrie operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot add an empty word")]
    EmptyWord,

    #[error("Child key mismatch: {0}")]
    KeyMismatch(String),

    #[error("Unknown node: {0}")]
    UnknownNode(usize),

    #[error("Malformed trie: {0}")]
    Malformed(String),

    #[error("Config error: {0}")]
    Config(String),
}

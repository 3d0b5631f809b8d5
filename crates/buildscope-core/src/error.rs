//! Error types for buildscope-core

use thiserror::Error;

/// Errors produced by the scoring and list operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An absent string reached a metric
    #[error("invalid input: {0} string is missing")]
    InvalidInput(&'static str),

    /// No selected metric produced a contribution
    #[error("no metric contributed to the fuzzy score")]
    EmptyOptionSet,

    /// Hamming distance requested for strings of different lengths
    #[error("hamming distance undefined for lengths {source_len} and {target_len}")]
    HammingLengthMismatch { source_len: usize, target_len: usize },

    /// Partition index outside the record list
    #[error("unknown partition: {0}")]
    UnknownPartition(i64),

    /// JSON (de)serialization failure
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

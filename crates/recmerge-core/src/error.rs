//! Error types for recmerge-core
//!
//! Scoring, clustering and merging are total and never fail. Only the
//! surrounding plumbing (config loading, record files, merge plans) does.

use thiserror::Error;

/// Result type alias for recmerge operations
pub type Result<T> = std::result::Result<T, RecmergeError>;

/// Main error type for recmerge operations
#[derive(Error, Debug)]
pub enum RecmergeError {
    /// TOML parse / deserialization error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Threshold outside 0..=100
    #[error("Invalid threshold {0}: must be between 0 and 100")]
    InvalidThreshold(u32),

    /// Reading a config or record file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record file is not valid JSON for the requested entity type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Primary index does not point into the group
    #[error("Primary index {index} out of range for group of {len} member(s)")]
    PrimaryOutOfRange { index: usize, len: usize },

    /// Pair operations need at least two records
    #[error("Need at least {needed} records, found {found}")]
    NotEnoughRecords { needed: usize, found: usize },
}

//! Error types for the cache engine and the trace harness
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Errors reported by [`SizedLruCache::upsert`](crate::cache::SizedLruCache::upsert).
///
/// `lookup` is total and never fails; eviction is the designed mechanism,
/// not an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Upsert called with a zero size; entry sizes must be strictly positive
    #[error("invalid size for key {key}: size must be strictly positive")]
    InvalidSize { key: u64 },

    /// Entry size exceeds total capacity; even an empty cache cannot hold it
    #[error("entry too large for key {key}: size {size} exceeds capacity {capacity}")]
    EntryTooLarge { key: u64, size: u64, capacity: u64 },
}

// == Trace Error Enum ==
/// Errors raised while discovering, parsing, or replaying scenario files.
#[derive(Error, Debug)]
pub enum TraceError {
    /// Failed to read a trace file or scan the trace directory
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Trace file is not valid scenario JSON
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A trace event violated the upsert contract (malformed scenario)
    #[error("replay aborted: {0}")]
    Replay(#[from] CacheError),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T, E = CacheError> = std::result::Result<T, E>;

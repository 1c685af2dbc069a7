//! Cache Module
//!
//! Provides the size-aware LRU cache engine: a recency list, a key index,
//! and the eviction routine that keeps total size within capacity.

mod list;
mod stats;
mod store;


// Re-export public types
pub use list::{RecencyList, SlotId};
pub use stats::CacheStats;
pub use store::SizedLruCache;

use crate::error::Result;

// == Cache Trait ==
/// Minimal surface shared by cache policies: a non-mutating size peek and
/// an insert-or-update that may evict.
///
/// The trace harness replays scenarios against `dyn Cache`, so alternative
/// eviction policies plug into the same registry and runner.
pub trait Cache {
    /// Returns the stored size for a key, or None if not resident.
    fn lookup(&self, key: u64) -> Option<u64>;

    /// Inserts or re-sizes an entry, evicting least-recently-used entries
    /// as needed to stay within capacity.
    fn upsert(&mut self, key: u64, size: u64) -> Result<()>;
}

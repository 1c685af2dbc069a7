//! Cache Statistics Module
//!
//! Tracks mutation counters: inserts, updates, evictions, and rejections.
//!
//! Lookup hit/miss accounting lives in the replay harness, not here:
//! `lookup` is a pure peek and records nothing.

use serde::Serialize;

// == Cache Stats ==
/// Mutation counters maintained by the cache engine.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of upserts that inserted a new key
    pub inserts: u64,
    /// Number of upserts that re-sized an already-resident key
    pub updates: u64,
    /// Number of entries removed by the eviction routine
    pub evictions: u64,
    /// Number of upserts rejected because the entry exceeded total capacity
    pub rejections: u64,
    /// Current number of resident entries
    pub resident_entries: usize,
    /// Current sum of resident entry sizes in bytes
    pub occupied_bytes: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Insert ==
    /// Increments the insert counter.
    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    // == Record Update ==
    /// Increments the update counter.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Rejection ==
    /// Increments the rejection counter.
    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Update Occupancy Snapshot ==
    /// Updates the resident entry count and occupied byte total.
    pub fn set_occupancy(&mut self, entries: usize, bytes: u64) {
        self.resident_entries = entries;
        self.occupied_bytes = bytes;
    }
}

//! Cache Store Module
//!
//! Size-aware LRU engine combining a key index with the recency list.
//!
//! Two views over one set of entries: the index maps each key to its size
//! and its slot in the recency list; the list orders those same keys from
//! most- to least-recently-used. Every mutation keeps both views and the
//! running `occupied` total in step, so `upsert` and `lookup` are O(1)
//! amortized.

use std::collections::HashMap;

use crate::cache::list::{RecencyList, SlotId};
use crate::cache::{Cache, CacheStats};
use crate::error::{CacheError, Result};

/// Index record for one resident key.
#[derive(Debug)]
struct IndexEntry {
    /// Declared byte size of the entry
    size: u64,
    /// Position in the recency list
    slot: SlotId,
}

// == Sized LRU Cache ==
/// Capacity-bounded cache where each entry carries an explicit byte size.
///
/// The capacity is fixed at construction. After every successful `upsert`
/// the sum of resident entry sizes is at most the capacity; `upsert` evicts
/// least-recently-used entries (possibly several) to make room.
///
/// Not internally synchronized: callers sharing one instance across threads
/// must serialize access externally.
#[derive(Debug)]
pub struct SizedLruCache {
    /// Key -> size and recency position
    index: HashMap<u64, IndexEntry>,
    /// Resident keys from most- to least-recently-used
    order: RecencyList,
    /// Mutation counters
    stats: CacheStats,
    /// Maximum total size of resident entries
    capacity: u64,
    /// Running sum of resident entry sizes, maintained incrementally
    occupied: u64,
}

impl SizedLruCache {
    // == Constructor ==
    /// Creates an empty cache with the given total capacity in bytes.
    pub fn new(capacity: u64) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
            occupied: 0,
        }
    }

    // == Lookup ==
    /// Returns the stored size for a key, or None if the key is not resident.
    ///
    /// This is a non-mutating peek: it does not bump the key's recency and
    /// never evicts. Only `upsert` moves a key to the front of the order.
    pub fn lookup(&self, key: u64) -> Option<u64> {
        self.index.get(&key).map(|entry| entry.size)
    }

    // == Upsert ==
    /// Inserts a new entry or re-sizes an already-resident one, then evicts
    /// least-recently-used entries until the total fits the capacity.
    ///
    /// The upserted key becomes the most recently used and is never evicted
    /// by its own call. An entry larger than the whole capacity can never
    /// fit: the cache is drained, the key is removed from consideration, and
    /// the call fails with [`CacheError::EntryTooLarge`].
    ///
    /// # Errors
    /// - [`CacheError::InvalidSize`] if `size` is zero (state unchanged)
    /// - [`CacheError::EntryTooLarge`] if `size` exceeds the capacity
    pub fn upsert(&mut self, key: u64, size: u64) -> Result<()> {
        if size == 0 {
            return Err(CacheError::InvalidSize { key });
        }

        if size > self.capacity {
            // Eviction would drain everything and the entry still would not
            // fit. Drain first, then report; the cache is left empty.
            if let Some(entry) = self.index.remove(&key) {
                self.occupied -= entry.size;
                self.order.remove(entry.slot);
                self.stats.record_eviction();
            }
            self.drain();
            self.sync_occupancy();
            self.stats.record_rejection();
            return Err(CacheError::EntryTooLarge {
                key,
                size,
                capacity: self.capacity,
            });
        }

        match self.index.get_mut(&key) {
            Some(entry) => {
                // Update case: retire the old size and mark the key most
                // recently used. Its new size is added back after eviction
                // has made room, so the running total never leaves the
                // capacity domain even near u64::MAX.
                self.occupied -= entry.size;
                entry.size = size;
                self.order.move_to_front(entry.slot);
                self.stats.record_update();
            }
            None => {
                let slot = self.order.push_front(key);
                self.index.insert(key, IndexEntry { size, slot });
                self.stats.record_insert();
            }
        }

        self.evict_to_fit(size);
        self.occupied += size;
        self.sync_occupancy();
        Ok(())
    }

    // == Eviction Routine ==
    /// Removes least-recently-used entries until `incoming` more bytes fit
    /// within the capacity.
    ///
    /// The caller has checked `incoming <= capacity`, so the subtraction
    /// cannot underflow. `occupied` does not yet count the upserted entry
    /// at the front: once every other entry is gone, `occupied` is zero
    /// and the loop stops before reaching it.
    fn evict_to_fit(&mut self, incoming: u64) {
        while self.occupied > self.capacity - incoming {
            let Some(key) = self.order.pop_back() else {
                break;
            };
            if let Some(entry) = self.index.remove(&key) {
                self.occupied -= entry.size;
            }
            self.stats.record_eviction();
        }
    }

    /// Evicts every resident entry.
    fn drain(&mut self) {
        while let Some(key) = self.order.pop_back() {
            if let Some(entry) = self.index.remove(&key) {
                self.occupied -= entry.size;
            }
            self.stats.record_eviction();
        }
    }

    /// Refreshes the occupancy snapshot carried by the stats.
    fn sync_occupancy(&mut self) {
        self.stats.set_occupancy(self.index.len(), self.occupied);
    }

    // == Capacity ==
    /// Returns the fixed total capacity in bytes.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    // == Occupied ==
    /// Returns the current sum of resident entry sizes.
    pub fn occupied(&self) -> u64 {
        self.occupied
    }

    // == Length ==
    /// Returns the current number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Recency Order ==
    /// Iterates resident keys from most- to least-recently-used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter()
    }

    // == Stats ==
    /// Returns current mutation counters and occupancy.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

// == Cache Trait Implementation ==
impl Cache for SizedLruCache {
    fn lookup(&self, key: u64) -> Option<u64> {
        SizedLruCache::lookup(self, key)
    }

    fn upsert(&mut self, key: u64, size: u64) -> Result<()> {
        SizedLruCache::upsert(self, key, size)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let cache = SizedLruCache::new(10);
        assert_eq!(cache.capacity(), 10);
        assert_eq!(cache.occupied(), 0);
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_upsert_and_lookup() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 4).unwrap();

        assert_eq!(cache.lookup(1), Some(4));
        assert_eq!(cache.occupied(), 4);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_lookup_nonexistent() {
        let cache = SizedLruCache::new(10);
        assert_eq!(cache.lookup(99), None);
    }

    #[test]
    fn test_store_lookup_is_pure_peek() {
        let mut cache = SizedLruCache::new(8);

        cache.upsert(1, 4).unwrap();
        cache.upsert(2, 4).unwrap();

        // Peeking at key 1 must not bump its recency
        assert_eq!(cache.lookup(1), Some(4));
        assert_eq!(cache.lookup(1), Some(4));

        // Key 1 is still the eviction candidate
        cache.upsert(3, 4).unwrap();
        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.lookup(2), Some(4));
    }

    #[test]
    fn test_store_evicts_lru_on_overflow() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 4).unwrap();
        cache.upsert(2, 4).unwrap();
        cache.upsert(3, 4).unwrap();

        // 12 > 10: key 1 (LRU) is evicted
        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.lookup(2), Some(4));
        assert_eq!(cache.lookup(3), Some(4));
        assert_eq!(cache.occupied(), 8);
    }

    #[test]
    fn test_store_evicts_multiple_entries() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 3).unwrap();
        cache.upsert(2, 3).unwrap();
        cache.upsert(3, 3).unwrap();

        // 9 + 7 = 16: evicting key 1 leaves 13, evicting key 2 leaves 10
        cache.upsert(4, 7).unwrap();

        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.lookup(2), None);
        assert_eq!(cache.lookup(3), Some(3));
        assert_eq!(cache.lookup(4), Some(7));
        assert_eq!(cache.occupied(), 10);
    }

    #[test]
    fn test_store_update_shrinks_entry() {
        let mut cache = SizedLruCache::new(5);

        cache.upsert(1, 5).unwrap();
        assert_eq!(cache.lookup(1), Some(5));

        cache.upsert(1, 3).unwrap();
        assert_eq!(cache.lookup(1), Some(3));
        assert_eq!(cache.occupied(), 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_update_grows_entry_and_evicts_others() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 4).unwrap();
        cache.upsert(2, 4).unwrap();

        // Growing key 1 to 8 overflows; key 2 (LRU) goes, never key 1
        cache.upsert(1, 8).unwrap();

        assert_eq!(cache.lookup(1), Some(8));
        assert_eq!(cache.lookup(2), None);
        assert_eq!(cache.occupied(), 8);
    }

    #[test]
    fn test_store_update_bumps_recency() {
        let mut cache = SizedLruCache::new(6);

        cache.upsert(1, 2).unwrap();
        cache.upsert(2, 2).unwrap();
        cache.upsert(3, 2).unwrap();

        // Re-upsert key 1: key 2 becomes the eviction candidate
        cache.upsert(1, 2).unwrap();
        cache.upsert(4, 2).unwrap();

        assert_eq!(cache.lookup(2), None);
        assert_eq!(cache.lookup(1), Some(2));
        assert_eq!(cache.lookup(3), Some(2));
        assert_eq!(cache.lookup(4), Some(2));
    }

    #[test]
    fn test_store_zero_size_rejected() {
        let mut cache = SizedLruCache::new(10);
        cache.upsert(1, 4).unwrap();

        let result = cache.upsert(2, 0);
        assert_eq!(result, Err(CacheError::InvalidSize { key: 2 }));

        // State unchanged
        assert_eq!(cache.lookup(1), Some(4));
        assert_eq!(cache.lookup(2), None);
        assert_eq!(cache.occupied(), 4);
    }

    #[test]
    fn test_store_entry_too_large_fails_and_drains() {
        let mut cache = SizedLruCache::new(5);

        cache.upsert(1, 2).unwrap();

        let result = cache.upsert(2, 10);
        assert_eq!(
            result,
            Err(CacheError::EntryTooLarge {
                key: 2,
                size: 10,
                capacity: 5
            })
        );

        // Drain-then-fail: the cache is left empty, nothing inserted
        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.lookup(2), None);
        assert!(cache.is_empty());
        assert_eq!(cache.occupied(), 0);
    }

    #[test]
    fn test_store_entry_too_large_on_empty_cache() {
        let mut cache = SizedLruCache::new(5);

        let result = cache.upsert(1, 10);
        assert!(matches!(result, Err(CacheError::EntryTooLarge { .. })));
        assert_eq!(cache.lookup(1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_oversize_update_removes_resident_key() {
        let mut cache = SizedLruCache::new(5);

        cache.upsert(1, 3).unwrap();
        cache.upsert(2, 2).unwrap();

        // Re-sizing key 1 beyond capacity removes it entirely, no partial state
        let result = cache.upsert(1, 6);
        assert!(matches!(result, Err(CacheError::EntryTooLarge { .. })));
        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.lookup(2), None);
        assert_eq!(cache.occupied(), 0);
    }

    #[test]
    fn test_store_exact_fit_does_not_evict() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 4).unwrap();
        cache.upsert(2, 6).unwrap();

        assert_eq!(cache.occupied(), 10);
        assert_eq!(cache.lookup(1), Some(4));
        assert_eq!(cache.lookup(2), Some(6));
    }

    #[test]
    fn test_store_zero_capacity_rejects_everything() {
        let mut cache = SizedLruCache::new(0);

        let result = cache.upsert(1, 1);
        assert!(matches!(result, Err(CacheError::EntryTooLarge { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_insert_at_u64_capacity_limit() {
        let mut cache = SizedLruCache::new(u64::MAX);

        cache.upsert(1, u64::MAX).unwrap();
        assert_eq!(cache.occupied(), u64::MAX);

        // A second full-capacity entry must evict the first, not overflow
        // the running total
        cache.upsert(2, u64::MAX).unwrap();

        assert_eq!(cache.lookup(1), None);
        assert_eq!(cache.lookup(2), Some(u64::MAX));
        assert_eq!(cache.occupied(), u64::MAX);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_update_at_u64_capacity_limit() {
        let mut cache = SizedLruCache::new(u64::MAX);

        cache.upsert(1, 4).unwrap();
        cache.upsert(2, u64::MAX - 4).unwrap();

        // Growing key 1 to the full capacity evicts key 2 and keeps the
        // total exactly at the bound
        cache.upsert(1, u64::MAX).unwrap();

        assert_eq!(cache.lookup(1), Some(u64::MAX));
        assert_eq!(cache.lookup(2), None);
        assert_eq!(cache.occupied(), u64::MAX);
    }

    #[test]
    fn test_store_keys_by_recency_order() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 2).unwrap();
        cache.upsert(2, 2).unwrap();
        cache.upsert(3, 2).unwrap();
        cache.upsert(1, 2).unwrap();

        let order: Vec<u64> = cache.keys_by_recency().collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn test_store_stats_counters() {
        let mut cache = SizedLruCache::new(10);

        cache.upsert(1, 4).unwrap();
        cache.upsert(2, 4).unwrap();
        cache.upsert(1, 5).unwrap(); // update, evicts nothing (9 <= 10)
        cache.upsert(3, 4).unwrap(); // evicts key 2
        let _ = cache.upsert(4, 99); // rejected, drains keys 1 and 3

        let stats = cache.stats();
        assert_eq!(stats.inserts, 3);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.evictions, 3);
        assert_eq!(stats.rejections, 1);
        assert_eq!(stats.resident_entries, 0);
        assert_eq!(stats.occupied_bytes, 0);
    }

    #[test]
    fn test_store_via_cache_trait_object() {
        let mut cache: Box<dyn Cache> = Box::new(SizedLruCache::new(10));

        cache.upsert(7, 3).unwrap();
        assert_eq!(cache.lookup(7), Some(3));
        assert_eq!(cache.lookup(8), None);
    }
}

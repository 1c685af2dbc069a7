//! Recency List Module
//!
//! Arena-backed doubly-linked ordering of resident keys for LRU eviction.
//!
//! Keys are held in slots of a `Vec`, linked front-to-back where:
//! - Front = Most recently used
//! - Back = Least recently used
//!
//! Every operation is O(1): the owning index remembers each key's `SlotId`,
//! so moving a key to the front or unlinking the tail never scans the list.
//! Freed slots are pushed on a free list and reused by later inserts.

// == Slot Id ==
/// Stable handle to a slot in the recency list.
///
/// Valid from the `push_front` that produced it until the slot is removed
/// (via `pop_back` or `remove`). The key index stores one per resident key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotId(usize);

/// One arena slot: a key plus its neighbor links.
#[derive(Debug)]
struct Slot {
    key: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Doubly-linked recency ordering over an arena of slots.
#[derive(Debug, Default)]
pub struct RecencyList {
    slots: Vec<Slot>,
    /// Indices of vacated slots, reused before the arena grows
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts a key at the front (most recently used) and returns its slot.
    pub fn push_front(&mut self, key: u64) -> SlotId {
        let slot = Slot {
            key,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(idx);
        } else {
            self.tail = Some(idx);
        }
        self.head = Some(idx);
        self.len += 1;
        SlotId(idx)
    }

    // == Move To Front ==
    /// Marks a resident key as most recently used.
    pub fn move_to_front(&mut self, id: SlotId) {
        if self.head == Some(id.0) {
            return;
        }
        self.unlink(id.0);

        self.slots[id.0].prev = None;
        self.slots[id.0].next = self.head;
        if let Some(old_head) = self.head {
            self.slots[old_head].prev = Some(id.0);
        } else {
            self.tail = Some(id.0);
        }
        self.head = Some(id.0);
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<u64> {
        let idx = self.tail?;
        let key = self.slots[idx].key;
        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        Some(key)
    }

    // == Remove ==
    /// Removes a key by its slot, regardless of position.
    pub fn remove(&mut self, id: SlotId) -> u64 {
        let key = self.slots[id.0].key;
        self.unlink(id.0);
        self.free.push(id.0);
        self.len -= 1;
        key
    }

    /// Detaches a slot from its neighbors without freeing it.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    // == Peek Front ==
    /// Returns the most recently used key without removing it.
    pub fn front(&self) -> Option<u64> {
        self.head.map(|idx| self.slots[idx].key)
    }

    // == Peek Back ==
    /// Returns the least recently used key without removing it.
    pub fn back(&self) -> Option<u64> {
        self.tail.map(|idx| self.slots[idx].key)
    }

    // == Length ==
    /// Returns the number of resident keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates keys from most- to least-recently-used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
        }
    }
}

/// Front-to-back iterator over resident keys.
#[derive(Debug)]
pub struct Iter<'a> {
    list: &'a RecencyList,
    next: Option<usize>,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let idx = self.next?;
        let slot = &self.list.slots[idx];
        self.next = slot.next;
        Some(slot.key)
    }
}

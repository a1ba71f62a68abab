//! Transposition table keyed by Zobrist hash, shared by all search workers.
//!
//! Every operation takes the lock exactly once, so readers always see whole
//! entries. There is no eviction: once `max_entries` keys are stored, new
//! keys are dropped while existing keys can still be refreshed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::moves::move_intent::MoveIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// The true score is at least `score` (the node failed high).
    Lower,
    /// The true score is at most `score` (the node failed low).
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<MoveIntent>,
}

impl TTEntry {
    /// The stored score when it settles a node searched to `depth` with the
    /// window `(alpha, beta)`.
    pub fn usable_score(&self, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug)]
pub struct SharedTranspositionTable {
    entries: RwLock<HashMap<u64, TTEntry>>,
    max_entries: usize,
    probes: AtomicU64,
    hits: AtomicU64,
    stores: AtomicU64,
}

impl SharedTranspositionTable {
    pub fn new(max_entries: usize) -> Arc<Self> {
        Arc::new(Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
            probes: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        })
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.probes.fetch_add(1, Ordering::Relaxed);
        let hit = self.entries.read().get(&key).copied();
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    /// Insert or refresh an entry. A key already present is only replaced by
    /// a search at least as deep.
    pub fn store(&self, entry: TTEntry) {
        let mut entries = self.entries.write();
        let len = entries.len();
        match entries.entry(entry.key) {
            Entry::Occupied(mut slot) => {
                if entry.depth >= slot.get().depth {
                    slot.insert(entry);
                    self.stores.fetch_add(1, Ordering::Relaxed);
                }
            }
            Entry::Vacant(slot) if len < self.max_entries => {
                slot.insert(entry);
                self.stores.fetch_add(1, Ordering::Relaxed);
                if len + 1 == self.max_entries {
                    debug!(max_entries = self.max_entries, "transposition table full");
                }
            }
            Entry::Vacant(_) => {}
        }
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        self.probes.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn stats(&self) -> TTStats {
        TTStats {
            probes: self.probes.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}

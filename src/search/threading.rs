//! Concurrency configuration and the worker pool used for root fan-out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::chess_errors::{ChessError, ChessResult};

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreadingConfig {
    /// Worker count; `0` means one per available hardware thread.
    pub requested_threads: usize,
}

impl ThreadingConfig {
    pub fn with_threads(requested_threads: usize) -> Self {
        Self { requested_threads }
    }

    #[inline]
    pub fn normalized_threads(self) -> usize {
        if self.requested_threads == 0 {
            thread::available_parallelism().map_or(1, |n| n.get())
        } else {
            self.requested_threads
        }
    }

    pub fn build_pool(self) -> ChessResult<ThreadPool> {
        ThreadPoolBuilder::new()
            .num_threads(self.normalized_threads())
            .thread_name(|index| format!("search-worker-{index}"))
            .build()
            .map_err(|err| ChessError::SearchSetup(err.to_string()))
    }
}

/// Node accounting shared by every worker of one search.
#[derive(Debug, Default)]
pub struct SearchCounters {
    nodes: AtomicU64,
}

impl SearchCounters {
    #[inline]
    pub fn add_node(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset(&self) {
        self.nodes.store(0, Ordering::Relaxed);
    }
}

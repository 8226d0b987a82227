//! Shared counters for a sweep in progress.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Lock-free counters updated by walker and deleter workers.
#[derive(Debug, Default)]
pub struct Stats {
    directories: AtomicUsize,
    inspected: AtomicUsize,
    bytes: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&self) {
        self.directories.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_inspected(&self) {
        self.inspected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the size of one deleted file.
    pub fn add_deleted(&self, bytes: u64) {
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Directories walked into.
    pub fn directories(&self) -> usize {
        self.directories.load(Ordering::Relaxed)
    }

    /// Non-directory entries checked against the target set.
    pub fn inspected(&self) -> usize {
        self.inspected.load(Ordering::Relaxed)
    }

    /// Bytes freed by deleted files.
    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub(crate) struct Counter(AtomicU64);

impl Counter {
    pub(crate) const fn new(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    pub(crate) fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Increments the counter and returns the new value.
    pub(crate) fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Decrements the counter and returns the new value.
    pub(crate) fn dec(&self) -> u64 {
        self.0.fetch_sub(1, Ordering::AcqRel) - 1
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Tracks the highest value ever observed.
#[derive(Debug, Default)]
pub(crate) struct Peak(AtomicU64);

impl Peak {
    pub(crate) fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn observe(&self, value: u64) {
        self.0.fetch_max(value, Ordering::Relaxed);
    }
}

use std::fmt::Display;

use crate::util::atomic::{Counter, Peak};

/// Statistics of a counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of completed increment attempts.
    pub increments: u64,
    /// The most workers ever observed inside the read-modify-write sequence
    /// at the same time.
    pub peak_occupancy: u64,
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: increments: {}, peak_occupancy: {}",
            self.increments, self.peak_occupancy
        )
    }
}

#[derive(Default)]
pub(crate) struct AtomicStats {
    increments: Counter,
    occupancy: Counter,
    peak_occupancy: Peak,
}

impl AtomicStats {
    /// Marks the calling worker as inside the read-modify-write sequence
    /// until the returned guard is dropped.
    pub(crate) fn enter(&self) -> Section<'_> {
        let now = self.occupancy.inc();
        self.peak_occupancy.observe(now);
        Section { stats: self }
    }

    pub(crate) fn snapshot(&self) -> Stats {
        Stats {
            increments: self.increments.get(),
            peak_occupancy: self.peak_occupancy.get(),
        }
    }
}

pub(crate) struct Section<'a> {
    stats: &'a AtomicStats,
}

impl<'a> Drop for Section<'a> {
    fn drop(&mut self) {
        self.stats.occupancy.dec();
        self.stats.increments.inc();
    }
}

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::Duration,
};

use log::{debug, trace};
use parking_lot::Mutex;

use crate::{
    options::{self, DEFAULT_IO_DELAY},
    stats::AtomicStats,
    util::latch::Latch,
    Options, Result, Stats,
};

/// How increments on a [`ConcurrentCounter`] are coordinated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No coordination. Concurrent increments may interleave between the
    /// read and the write and lose updates, so the final value is only
    /// bounded by the expected one.
    Unsafe,
    /// Every increment runs inside a mutually exclusive critical section.
    Safe,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Unsafe => "unsafe",
            Mode::Safe => "safe",
        })
    }
}

enum Cell {
    // Loads and stores are atomic individually, the increment is not.
    Unsafe(AtomicU64),
    Safe(Mutex<u64>),
}

/// A counter incremented by many workers at once.
///
/// Each increment reads the current value, waits for a simulated I/O delay,
/// then writes the read value plus one.
pub struct ConcurrentCounter {
    mode: Mode,
    io_delay: Duration,
    cell: Cell,
    stats: AtomicStats,
}

impl ConcurrentCounter {
    /// Creates a counter at zero with the default I/O delay.
    pub fn new(mode: Mode) -> Self {
        Self::with_delay(mode, DEFAULT_IO_DELAY)
    }

    /// Creates a counter at zero that waits `io_delay` between the read and
    /// the write of every increment.
    pub fn with_delay(mode: Mode, io_delay: Duration) -> Self {
        let cell = match mode {
            Mode::Unsafe => Cell::Unsafe(AtomicU64::new(0)),
            Mode::Safe => Cell::Safe(Mutex::new(0)),
        };
        Self {
            mode,
            io_delay,
            cell,
            stats: AtomicStats::default(),
        }
    }

    /// Returns the coordination mode of this counter.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the current value.
    pub fn value(&self) -> u64 {
        match &self.cell {
            Cell::Unsafe(value) => value.load(Ordering::Acquire),
            Cell::Safe(value) => *value.lock(),
        }
    }

    /// Returns a snapshot of the statistics collected so far.
    pub fn stats(&self) -> Stats {
        self.stats.snapshot()
    }

    /// Increments the counter by one.
    pub fn increment_once(&self) {
        match &self.cell {
            Cell::Unsafe(value) => {
                let _section = self.stats.enter();
                let current = value.load(Ordering::Acquire);
                self.io_wait();
                value.store(current + 1, Ordering::Release);
            }
            Cell::Safe(value) => {
                let mut guard = value.lock();
                // Dropped before `guard`, so occupancy is measured while the
                // lock is still held.
                let _section = self.stats.enter();
                let current = *guard;
                self.io_wait();
                *guard = current + 1;
            }
        }
    }

    /// Spawns `workers` threads that each increment the counter
    /// `increments_per_worker` times, waits for all of them, and returns the
    /// final value.
    ///
    /// Returns [`Error::InvalidArgument`] without spawning anything if either
    /// argument is zero. A panicking worker is propagated to the caller once
    /// the others have been joined.
    ///
    /// [`Error::InvalidArgument`]: crate::Error::InvalidArgument
    pub fn run(&self, workers: usize, increments_per_worker: usize) -> Result<u64> {
        options::validate(workers, increments_per_worker)?;
        debug!(
            "Run {} counter with {workers} workers x {increments_per_worker} increments",
            self.mode
        );

        let latch = Latch::new(workers);
        thread::scope(|scope| -> Result<()> {
            for id in 0..workers {
                let latch = &latch;
                let spawned = thread::Builder::new()
                    .name(format!("worker-{id}"))
                    .spawn_scoped(scope, move || {
                        latch.arrive_and_wait();
                        for _ in 0..increments_per_worker {
                            self.increment_once();
                        }
                        trace!("Worker {id} done");
                    });
                if let Err(err) = spawned {
                    // Let the spawned workers finish before the scope joins them.
                    latch.release();
                    return Err(err.into());
                }
            }
            Ok(())
        })?;

        let value = self.value();
        debug!("Run {} counter finished with value {value}", self.mode);
        Ok(value)
    }

    fn io_wait(&self) {
        if self.io_delay.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(self.io_delay);
        }
    }
}

/// The result of a single run.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// The mode of the counter.
    pub mode: Mode,
    /// The final counter value.
    pub value: u64,
    /// The value expected if no update was lost.
    pub expected: u64,
    /// Statistics collected during the run.
    pub stats: Stats,
}

impl Outcome {
    /// Number of increments that were overwritten by another worker.
    pub fn lost_updates(&self) -> u64 {
        self.expected.saturating_sub(self.value)
    }

    /// Whether every increment was counted.
    pub fn is_exact(&self) -> bool {
        self.value == self.expected
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Final counter value: {}", self.value)
    }
}

/// Runs a fresh counter once with the given options.
pub fn run(mode: Mode, options: &Options) -> Result<Outcome> {
    options.validate()?;
    let counter = ConcurrentCounter::with_delay(mode, options.io_delay);
    let value = counter.run(options.workers, options.increments_per_worker)?;
    Ok(Outcome {
        mode,
        value,
        expected: options.expected(),
        stats: counter.stats(),
    })
}

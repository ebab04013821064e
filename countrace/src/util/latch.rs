use parking_lot::{Condvar, Mutex};

/// A counter which used to start multiple threads at the same moment. It is
/// a single-use barrier.
pub(crate) struct Latch {
    expect: usize,
    core: Mutex<LatchCore>,
    cond: Condvar,
}

struct LatchCore {
    count: usize,
    released: bool,
}

impl Latch {
    /// Create a new `Latch` that opens once `expect` threads have arrived.
    pub(crate) fn new(expect: usize) -> Self {
        Latch {
            expect,
            core: Mutex::new(LatchCore {
                count: 0,
                released: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Counts down and blocks until the latch opens.
    ///
    /// # Panic
    ///
    /// Panic if more than `expect` threads arrive.
    pub(crate) fn arrive_and_wait(&self) {
        let mut core = self.core.lock();
        core.count += 1;
        assert!(core.count <= self.expect);
        if core.count == self.expect {
            core.released = true;
            self.cond.notify_all();
            return;
        }
        while !core.released {
            self.cond.wait(&mut core);
        }
    }

    /// Opens the latch regardless of how many threads have arrived.
    pub(crate) fn release(&self) {
        let mut core = self.core.lock();
        core.released = true;
        self.cond.notify_all();
    }

    #[cfg(test)]
    fn is_released(&self) -> bool {
        self.core.lock().released
    }
}

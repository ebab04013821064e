use std::time::Duration;

use crate::{Error, Result};

/// Options to configure a run.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Options {
    /// Number of concurrent workers.
    ///
    /// Default: 10
    pub workers: usize,

    /// Number of increments each worker performs, one after another.
    ///
    /// Default: 1000
    pub increments_per_worker: usize,

    /// Simulated I/O latency between reading and writing the counter.
    ///
    /// A zero delay yields the thread instead of sleeping.
    ///
    /// Default: 100us
    pub io_delay: Duration,
}

impl Options {
    /// The final value a run is expected to reach when no update is lost.
    pub fn expected(&self) -> u64 {
        (self.workers as u64).saturating_mul(self.increments_per_worker as u64)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate(self.workers, self.increments_per_worker)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            workers: 10,
            increments_per_worker: 1000,
            io_delay: DEFAULT_IO_DELAY,
        }
    }
}

pub(crate) const DEFAULT_IO_DELAY: Duration = Duration::from_micros(100);

pub(crate) fn validate(workers: usize, increments_per_worker: usize) -> Result<()> {
    if workers == 0 {
        return Err(Error::InvalidArgument("worker count must be at least 1"));
    }
    if increments_per_worker == 0 {
        return Err(Error::InvalidArgument(
            "increments per worker must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = Options::default();
        assert_eq!(options.workers, 10);
        assert_eq!(options.increments_per_worker, 1000);
        assert_eq!(options.io_delay, Duration::from_micros(100));
        assert_eq!(options.expected(), 10_000);
    }

    #[test]
    fn validate_rejects_zero() {
        let mut options = Options::default();
        options.workers = 0;
        assert!(matches!(options.validate(), Err(Error::InvalidArgument(_))));

        let mut options = Options::default();
        options.increments_per_worker = 0;
        assert!(matches!(options.validate(), Err(Error::InvalidArgument(_))));

        assert!(validate(1, 1).is_ok());
    }
}

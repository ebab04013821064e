//! Lost updates on a shared counter, with and without a lock.
//!
//! A [`ConcurrentCounter`] is incremented by many workers at once. Every
//! increment reads the counter, waits for a simulated I/O delay, then writes
//! back the read value plus one. The counter runs in one of two modes:
//!
//! - [`Mode::Unsafe`]: no coordination. Workers interleave between the read
//!   and the write and overwrite each other's increments.
//! - [`Mode::Safe`]: each increment holds a lock for its whole
//!   read-modify-write sequence, so the final value is always exact.
//!
//! ```no_run
//! use countrace::{run, Mode, Options};
//!
//! let outcome = run(Mode::Safe, &Options::default())?;
//! assert_eq!(outcome.value, 10_000);
//! # Ok::<(), countrace::Error>(())
//! ```

#![warn(missing_docs, unreachable_pub)]

mod counter;
pub use counter::{run, ConcurrentCounter, Mode, Outcome};

mod error;
pub use error::{Error, Result};

mod options;
pub use options::Options;

mod probe;
pub use probe::{probe, ProbeReport};

mod stats;
pub use stats::Stats;

mod util;

//! Repeated runs that look for a lost update.
//!
//! Whether a lost update surfaces on a given run depends on how the OS
//! schedules the workers, so a single unsafe run may come out exact. Probing
//! repeats the run and stops at the first one that loses updates. Even then
//! the result is a statistical expectation, not a guarantee: a large enough
//! I/O delay makes a race very likely on common hardware, nothing more.

use log::{debug, info};

use crate::{counter, Error, Mode, Options, Outcome, Result};

/// The trials executed by [`probe`].
#[derive(Clone, Debug, Default)]
pub struct ProbeReport {
    /// Outcomes of the executed trials, in order.
    pub trials: Vec<Outcome>,
}

impl ProbeReport {
    /// Number of trials executed.
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Returns true if no trial was executed.
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Returns the first trial that lost updates, with its 1-based index.
    pub fn race_observed(&self) -> Option<(usize, &Outcome)> {
        self.trials
            .iter()
            .enumerate()
            .find(|(_, outcome)| !outcome.is_exact())
            .map(|(i, outcome)| (i + 1, outcome))
    }
}

/// Runs up to `max_trials` fresh counters and stops after the first one
/// that lost updates.
pub fn probe(mode: Mode, options: &Options, max_trials: usize) -> Result<ProbeReport> {
    if max_trials == 0 {
        return Err(Error::InvalidArgument("trial count must be at least 1"));
    }
    options.validate()?;

    let mut report = ProbeReport::default();
    for trial in 1..=max_trials {
        let outcome = counter::run(mode, options)?;
        debug!("Trial {trial}: {outcome}");
        let lost = outcome.lost_updates();
        report.trials.push(outcome);
        if lost > 0 {
            info!("Trial {trial} lost {lost} updates");
            break;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn options(workers: usize, increments_per_worker: usize, io_delay: Duration) -> Options {
        let mut options = Options::default();
        options.workers = workers;
        options.increments_per_worker = increments_per_worker;
        options.io_delay = io_delay;
        options
    }

    #[test]
    fn probe_rejects_zero_trials() {
        assert!(matches!(
            probe(Mode::Unsafe, &Options::default(), 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            probe(Mode::Unsafe, &options(10, 0, Duration::ZERO), 3),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn probe_unsafe_observes_race() {
        let _ = env_logger::builder().is_test(true).try_init();
        let report = probe(Mode::Unsafe, &options(10, 100, Duration::from_micros(100)), 10).unwrap();
        let (trial, outcome) = report.race_observed().expect("no lost update in 10 trials");
        assert_eq!(trial, report.len());
        assert!(outcome.value < 1000);
        assert!(report.trials[..trial - 1].iter().all(Outcome::is_exact));
    }

    #[test]
    fn probe_safe_runs_every_trial() {
        let report = probe(Mode::Safe, &options(4, 25, Duration::ZERO), 5).unwrap();
        assert_eq!(report.len(), 5);
        assert!(report.race_observed().is_none());
        assert!(report.trials.iter().all(|o| o.value == 100));
    }

    #[test]
    fn probe_single_worker_never_races() {
        let report = probe(Mode::Unsafe, &options(1, 50, Duration::ZERO), 3).unwrap();
        assert_eq!(report.len(), 3);
        assert!(report.race_observed().is_none());
    }
}

//! A set of tools for countrace.

mod probe;
mod run;

use core::fmt;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
pub(crate) use countrace::Result;
use countrace::{Mode, Options};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Run(run::Args),
    Probe(probe::Args),
}

/// Flags shared by every subcommand that runs workers.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct WorkloadArgs {
    /// Number of concurrent workers.
    #[arg(short, long, default_value_t = 10)]
    workers: usize,

    /// Simulated I/O delay between the read and the write of every
    /// increment, in microseconds. 0 yields the thread instead.
    #[arg(long, default_value_t = 100)]
    io_delay_us: u64,
}

impl WorkloadArgs {
    pub(crate) fn options(&self, increments_per_worker: usize) -> Options {
        let mut options = Options::default();
        options.workers = self.workers;
        options.increments_per_worker = increments_per_worker;
        options.io_delay = Duration::from_micros(self.io_delay_us);
        options
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum ModeArg {
    Unsafe,
    Safe,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Unsafe => Mode::Unsafe,
            ModeArg::Safe => Mode::Safe,
        }
    }
}

impl fmt::Display for ModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeArg::Unsafe => "unsafe",
            ModeArg::Safe => "safe",
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    match args.cmd {
        Commands::Run(args) => run::run(args)?,
        Commands::Probe(args) => probe::run(args)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let args = Args::parse_from(["countrace-tools", "run"]);
        let Commands::Run(args) = args.cmd else {
            panic!("expected run subcommand");
        };
        let options = args.options();
        assert_eq!(Mode::from(args.mode), Mode::Safe);
        assert_eq!(options.workers, 10);
        assert_eq!(options.increments_per_worker, 1000);
        assert_eq!(options.io_delay, Duration::from_micros(100));
    }

    #[test]
    fn probe_flags() {
        let args = Args::parse_from([
            "countrace-tools",
            "probe",
            "--mode",
            "unsafe",
            "--workers",
            "4",
            "--increments",
            "20",
            "--io-delay-us",
            "0",
            "--trials",
            "3",
        ]);
        let Commands::Probe(args) = args.cmd else {
            panic!("expected probe subcommand");
        };
        let options = args.options();
        assert_eq!(Mode::from(args.mode), Mode::Unsafe);
        assert_eq!(options.workers, 4);
        assert_eq!(options.increments_per_worker, 20);
        assert!(options.io_delay.is_zero());
        assert_eq!(args.trials, 3);
    }
}

//! Repeats unsafe runs until one of them loses updates.

use clap::Parser;
use countrace::Options;

use crate::{ModeArg, Result, WorkloadArgs};

#[derive(Parser, Debug, Clone)]
#[clap(about = "Repeat runs until an update is lost")]
pub(crate) struct Args {
    /// How increments are coordinated.
    #[arg(short, long, default_value_t = ModeArg::Unsafe)]
    pub(crate) mode: ModeArg,

    /// Number of increments each worker performs.
    #[arg(short, long, default_value_t = 100)]
    increments: usize,

    #[command(flatten)]
    workload: WorkloadArgs,

    /// Maximum number of runs.
    #[arg(short, long, default_value_t = 10)]
    pub(crate) trials: usize,
}

impl Args {
    pub(crate) fn options(&self) -> Options {
        self.workload.options(self.increments)
    }
}

pub(crate) fn run(args: Args) -> Result<()> {
    let options = args.options();
    let report = countrace::probe(args.mode.into(), &options, args.trials)?;
    for (i, outcome) in report.trials.iter().enumerate() {
        println!("Trial {}: {outcome}", i + 1);
    }
    match report.race_observed() {
        Some((trial, outcome)) => println!(
            "Expected {} but got {} on trial {trial}, {} updates lost",
            outcome.expected,
            outcome.value,
            outcome.lost_updates()
        ),
        None => println!("No lost update after {} trials", report.len()),
    }
    Ok(())
}

use clap::Parser;
use countrace::Options;
use log::debug;

use crate::{ModeArg, Result, WorkloadArgs};

#[derive(Parser, Debug, Clone)]
#[clap(about = "Run the counter once and print the final value")]
pub(crate) struct Args {
    /// How increments are coordinated.
    #[arg(short, long, default_value_t = ModeArg::Safe)]
    pub(crate) mode: ModeArg,

    /// Number of increments each worker performs.
    #[arg(short, long, default_value_t = 1000)]
    increments: usize,

    #[command(flatten)]
    workload: WorkloadArgs,

    /// Also print the expected value, lost updates and peak occupancy.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

impl Args {
    pub(crate) fn options(&self) -> Options {
        self.workload.options(self.increments)
    }
}

pub(crate) fn run(args: Args) -> Result<()> {
    let options = args.options();
    debug!("Start {} run with {options:?}", args.mode);
    let outcome = countrace::run(args.mode.into(), &options)?;
    println!("{outcome}");
    if args.stats {
        println!(
            "Expected: {}, lost updates: {}",
            outcome.expected,
            outcome.lost_updates()
        );
        println!("{}", outcome.stats);
    }
    Ok(())
}

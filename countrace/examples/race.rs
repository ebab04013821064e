use countrace::{run, Mode, Options, Result};

fn main() -> Result<()> {
    let mut options = Options::default();
    options.increments_per_worker = 100;
    // The unsafe counter usually ends up short, the safe one never does.
    for mode in [Mode::Unsafe, Mode::Safe] {
        let outcome = run(mode, &options)?;
        println!(
            "{mode}: {outcome} (expected {}, lost {})",
            outcome.expected,
            outcome.lost_updates()
        );
    }
    Ok(())
}

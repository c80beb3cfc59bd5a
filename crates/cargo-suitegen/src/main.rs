//! Command line front end for suitegen code generation.

mod cli;
mod logging;
mod output;

fn main() -> eyre::Result<()> {
    cli::run()
}

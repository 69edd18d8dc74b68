use anyhow::Result;
use clap::Parser;

use jstrace_cli::args::CliArgs;
use jstrace_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // Initialize tracing if JSTRACE_LOG, RUST_LOG or JSTRACE_LOG_FORMAT is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    println!("{output}");
    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the jstrace binary.
#[derive(Parser, Debug)]
#[command(
    name = "jstrace",
    version,
    about = "Resolve JavaScript call sites to the function bodies they run"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the stack trace of each program.
    ///
    /// Every input is an ESTree JSON document (e.g. `acorn --ecma2020 file.js`).
    Analyze {
        /// ESTree JSON files to analyze.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Resolve the callee of a single call expression.
    Resolve {
        /// ESTree JSON file.
        file: PathBuf,

        /// Zero-based position of the call among all calls, in source order.
        #[arg(long)]
        call: usize,
    },
}

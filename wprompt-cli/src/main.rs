//! Binary crate for the `wprompt` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Installing the stderr log subscriber
//! - Running the conditions pipeline and printing its one line

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}

//! Hearth - Entry Point
//!
//! Starts a container over the link-time registry, prints what it
//! discovered and keeps it running until Ctrl-C.

use clap::Parser;
use hearth::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}

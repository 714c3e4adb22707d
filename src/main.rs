//! Terminal front-end for Skycast.
//!
//! Parses one command per invocation and dispatches it against the city
//! store; all output formatting lives here.

use clap::Parser;

mod cli;
mod fmt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skycast_core::init()?;

    let cli = cli::Cli::parse();
    cli.run().await
}

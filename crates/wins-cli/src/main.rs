mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    commands::run(cli).await
}

/// Logs go to stderr so `--json` and SVG output on stdout stay clean.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

//! chatterm entry point.
//!
//! Binary name: `chatterm`
//!
//! Parses CLI arguments, initializes logging, then hands off to
//! [`cli::run`]. Any startup error (most commonly a missing API key)
//! is printed and exits with status 1.

mod cli;

use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = chatterm_observe::tracing_setup::filter_for_verbosity(cli.verbose, cli.quiet);
    chatterm_observe::tracing_setup::init_tracing(filter)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    cli::run(cli).await
}

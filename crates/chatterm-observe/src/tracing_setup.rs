//! Tracing subscriber initialization.
//!
//! Logs go to stderr so they never interleave with the chat transcript on
//! stdout. `RUST_LOG`, when set, replaces the verbosity-derived filter.
//!
//! # Usage
//!
//! ```no_run
//! let filter = chatterm_observe::tracing_setup::filter_for_verbosity(1, false);
//! chatterm_observe::tracing_setup::init_tracing(filter).unwrap();
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Map `-v` count and `--quiet` to a default filter directive.
///
/// - `--quiet`: errors only
/// - no flag: warnings
/// - `-v`: info, debug for chatterm crates
/// - `-vv` and above: trace
pub fn filter_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info,chatterm_core=debug,chatterm_infra=debug,chatterm=debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// Installs a compact `fmt` layer on stderr (no targets) filtered by
/// `RUST_LOG` if present, else by `default_filter`.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(default_filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

//! Thinking spinner shown while a completion is pending.
//!
//! The spinner ticks on indicatif's background thread and draws to
//! stderr. Dropping the guard calls `finish_and_clear`, so the spinner
//! line is gone before the reply is printed, on every exit path.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use chatterm_core::busy::BusyIndicator;

const TICK: Duration = Duration::from_millis(80);

/// indicatif-backed [`BusyIndicator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Spinner;

/// Keeps the spinner alive. Dropping it stops and erases the spinner.
pub struct SpinnerGuard {
    bar: ProgressBar,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl BusyIndicator for Spinner {
    type Guard = SpinnerGuard;

    fn start(&self, label: &str) -> SpinnerGuard {
        let bar = ProgressBar::new_spinner();
        match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            Ok(style) => bar.set_style(style),
            Err(e) => tracing::debug!("spinner template rejected: {e}"),
        }
        bar.set_message(label.to_string());
        bar.enable_steady_tick(TICK);
        SpinnerGuard { bar }
    }
}

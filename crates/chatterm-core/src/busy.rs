//! Busy indicator port.
//!
//! A busy indicator is a scoped resource: `start` returns a guard, and the
//! indicator stays visible exactly as long as the guard is alive. Dropping
//! the guard must stop the animation and reclaim its terminal line, so the
//! stop runs on every exit path of the awaited call.

/// Visual feedback for one in-flight gateway call.
///
/// Purely cosmetic. Implementations swallow their own drawing failures;
/// nothing about the indicator may abort or delay the call it decorates.
pub trait BusyIndicator {
    /// Dropping the guard stops the indicator.
    type Guard;

    /// Start showing the indicator with the given label.
    fn start(&self, label: &str) -> Self::Guard;
}

/// Indicator that shows nothing. Used for non-interactive output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicator;

impl BusyIndicator for NoIndicator {
    type Guard = ();

    fn start(&self, _label: &str) -> Self::Guard {}
}

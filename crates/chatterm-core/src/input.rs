//! Input source port for the session loop.
//!
//! An input source blocks (cooperatively) until the user has finished one
//! submission, which may span many lines, and reports it as an event. The
//! submit gesture and the end-session gesture are distinct events rather
//! than flags the loop has to poll.

use std::future::Future;
use std::io;

/// What the user did at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The buffer was submitted with the explicit submit gesture.
    Submit(String),
    /// The user asked to end the session (e.g. Ctrl+Q).
    EndSession,
}

/// Produces one [`InputEvent`] per call.
pub trait InputSource {
    /// Wait for the next complete submission or end-of-session gesture.
    fn next_event(&mut self) -> impl Future<Output = io::Result<InputEvent>>;
}

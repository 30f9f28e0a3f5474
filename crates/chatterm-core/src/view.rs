//! Output port for the session loop.
//!
//! The engine decides *what* to show; a `ChatView` decides *how*. The
//! terminal implementation in chatterm-cli renders markdown and styles
//! labels, tests record calls.

/// Everything the session engine can put on screen.
pub trait ChatView {
    /// Render an assistant reply (markdown).
    fn show_reply(&mut self, reply: &str);

    /// Show a failed turn. `message` is also what `raw` will replay.
    fn show_error(&mut self, message: &str);

    /// Re-display the last reply unrendered, or a placeholder when there is
    /// none yet.
    fn show_raw(&mut self, last_reply: Option<&str>);

    /// Show the in-session help text.
    fn show_help(&mut self);

    /// Clear the visible viewport. Never touches conversation state.
    fn clear(&mut self);

    /// Say goodbye when the session ends.
    fn show_farewell(&mut self);
}

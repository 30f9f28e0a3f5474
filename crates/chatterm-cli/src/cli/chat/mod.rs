//! Interactive terminal chat for chatterm.
//!
//! The terminal side of the session engine: a multi-line composer, a
//! markdown renderer with highlighted code, a thinking spinner, and the
//! welcome banner. The loop itself is `chatterm_core::session`.

pub mod banner;
pub mod help;
pub mod input;
pub mod renderer;
pub mod spinner;
pub mod view;

use std::io;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType, SetTitle};

/// Window title set at startup.
pub const TERMINAL_TITLE: &str = "chatterm";

/// Set the window title and clear the screen. Cosmetic: failures are
/// logged and ignored.
pub fn prepare_terminal() {
    if let Err(e) = crossterm::execute!(
        io::stdout(),
        SetTitle(TERMINAL_TITLE),
        Clear(ClearType::All),
        MoveTo(0, 0)
    ) {
        tracing::debug!("could not prepare terminal: {e}");
    }
}

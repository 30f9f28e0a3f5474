//! Terminal implementation of the session view.
//!
//! Replies are labelled and rendered as markdown; `raw` prints the stored
//! text untouched. Write failures are ignored: a broken stdout must not
//! take the session down with it.

use std::io::{self, Write};

use console::style;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

use chatterm_core::view::ChatView;

use super::help::write_help;
use super::renderer::ChatRenderer;

/// Printed under a raw reply.
const RAW_SEPARATOR: &str = "-------------------------";

/// [`ChatView`] that writes to a terminal (or any writer, in tests).
pub struct TerminalView<W: Write> {
    renderer: ChatRenderer,
    out: W,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(renderer: ChatRenderer) -> Self {
        Self::new(renderer, io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(renderer: ChatRenderer, out: W) -> Self {
        Self { renderer, out }
    }

    fn label(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style("    GPT:").on_red().white().bold())
    }

    fn write_reply(&mut self, reply: &str) -> io::Result<()> {
        self.label()?;
        let rendered = self.renderer.render_final(reply);
        write!(self.out, "{rendered}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn write_error(&mut self, message: &str) -> io::Result<()> {
        self.label()?;
        writeln!(self.out, "{}", style(message).red())?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn write_raw(&mut self, last_reply: Option<&str>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", last_reply.unwrap_or("No response to display."))?;
        writeln!(self.out)?;
        writeln!(self.out, "{RAW_SEPARATOR}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Show a note in place of a reply (e.g. why seeding failed).
    pub fn show_note(&mut self, note: &str) {
        self.show_reply(note);
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            tracing::debug!("terminal write failed: {e}");
        }
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn show_reply(&mut self, reply: &str) {
        Self::report(self.write_reply(reply));
    }

    fn show_error(&mut self, message: &str) {
        Self::report(self.write_error(message));
    }

    fn show_raw(&mut self, last_reply: Option<&str>) {
        Self::report(self.write_raw(last_reply));
    }

    fn show_help(&mut self) {
        Self::report(write_help(&mut self.out).and_then(|()| self.out.flush()));
    }

    fn clear(&mut self) {
        Self::report(crossterm::execute!(self.out, Clear(ClearType::All), MoveTo(0, 0)));
    }

    fn show_farewell(&mut self) {
        Self::report(
            writeln!(self.out, "Ending the conversation. Goodbye!").and_then(|()| self.out.flush()),
        );
    }
}

//! Multi-line composer for the chat loop.
//!
//! Enter inserts a newline; the message is only sent with the explicit
//! submit gesture (Ctrl+Space, or Alt+Enter for terminals that cannot
//! report Ctrl+Space). Key handling lives in [`Composer`], a plain state
//! machine over crossterm events; [`TerminalInput`] feeds it from the
//! terminal in raw mode and echoes what it decides.

use std::io::{self, Write};

use console::style;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use futures_util::StreamExt;

use chatterm_core::input::{InputEvent, InputSource};

/// What the composer did with one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    /// Text was appended to the buffer.
    Inserted(String),
    /// A line break was appended.
    NewLine,
    /// One character was removed. `line` is what remains of the line the
    /// cursor ends up on; `joined` is set when a line break was removed.
    Erased { line: String, joined: bool },
    /// The buffer was thrown away.
    Discarded,
    /// The buffer was taken for sending.
    Submitted(String),
    /// The user ended the session.
    Ended,
    /// Nothing changed.
    Ignored,
}

/// Input buffer plus the key bindings that act on it.
#[derive(Debug, Default)]
pub struct Composer {
    buffer: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Apply one terminal event.
    pub fn handle(&mut self, event: &Event) -> ComposerAction {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Paste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.push_str(&text);
                ComposerAction::Inserted(text)
            }
            _ => ComposerAction::Ignored,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ComposerAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(' ') if ctrl => self.submit(),
            KeyCode::Enter if alt => self.submit(),
            KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => ComposerAction::Ended,
            KeyCode::Char('d') if ctrl && self.buffer.is_empty() => ComposerAction::Ended,
            KeyCode::Char('c') if ctrl => {
                self.buffer.clear();
                ComposerAction::Discarded
            }
            KeyCode::Enter => {
                self.buffer.push('\n');
                ComposerAction::NewLine
            }
            KeyCode::Tab => {
                self.buffer.push('\t');
                ComposerAction::Inserted("\t".to_string())
            }
            KeyCode::Backspace => self.erase(),
            KeyCode::Char(c) if !ctrl => {
                self.buffer.push(c);
                ComposerAction::Inserted(c.to_string())
            }
            _ => ComposerAction::Ignored,
        }
    }

    fn submit(&mut self) -> ComposerAction {
        ComposerAction::Submitted(std::mem::take(&mut self.buffer))
    }

    fn erase(&mut self) -> ComposerAction {
        let Some(removed) = self.buffer.pop() else {
            return ComposerAction::Ignored;
        };
        ComposerAction::Erased {
            line: self.current_line().to_string(),
            joined: removed == '\n',
        }
    }

    fn current_line(&self) -> &str {
        let start = self.buffer.rfind('\n').map_or(0, |i| i + 1);
        &self.buffer[start..]
    }
}

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = crossterm::execute!(io::stdout(), EnableBracketedPaste) {
            tracing::debug!("bracketed paste unavailable: {e}");
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(io::stdout(), DisableBracketedPaste);
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("failed to leave raw mode: {e}");
        }
    }
}

/// [`InputSource`] reading from the terminal.
pub struct TerminalInput {
    events: EventStream,
    composer: Composer,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            events: EventStream::new(),
            composer: Composer::new(),
        }
    }

    fn print_prompt(out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        write!(out, "{}\r\n", style("    You:").on_color256(208).white().bold())?;
        out.flush()
    }

    /// Mirror a composer action on screen. Raw mode needs explicit `\r`.
    ///
    /// Erasing redraws the whole line from column 0 so tabs and wide
    /// characters stay in step with the buffer.
    fn echo(out: &mut impl Write, action: &ComposerAction) -> io::Result<()> {
        match action {
            ComposerAction::Inserted(text) => {
                write!(out, "{}", text.replace('\n', "\r\n"))?;
            }
            ComposerAction::NewLine => write!(out, "\r\n")?,
            ComposerAction::Erased { line, joined } => {
                if *joined {
                    crossterm::queue!(out, MoveUp(1))?;
                }
                crossterm::queue!(out, MoveToColumn(0), Clear(ClearType::UntilNewLine))?;
                write!(out, "{line}")?;
            }
            ComposerAction::Discarded => {
                write!(out, "{}\r\n", style("^C (discarded)").dim())?;
                write!(out, "{}\r\n", style("    You:").on_color256(208).white().bold())?;
            }
            ComposerAction::Submitted(_) | ComposerAction::Ended => write!(out, "\r\n")?,
            ComposerAction::Ignored => {}
        }
        out.flush()
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    async fn next_event(&mut self) -> io::Result<InputEvent> {
        let mut out = io::stdout();
        Self::print_prompt(&mut out)?;
        let _raw = RawModeGuard::enable()?;

        loop {
            let Some(event) = self.events.next().await else {
                tracing::debug!("terminal event stream closed");
                return Ok(InputEvent::EndSession);
            };
            let event = event?;

            let action = self.composer.handle(&event);
            if let Err(e) = Self::echo(&mut out, &action) {
                tracing::debug!("echo failed: {e}");
            }

            match action {
                ComposerAction::Submitted(text) => return Ok(InputEvent::Submit(text)),
                ComposerAction::Ended => return Ok(InputEvent::EndSession),
                _ => {}
            }
        }
    }
}

//! In-session help text.

use std::io::{self, Write};

use console::style;

use chatterm_core::command::Command;

fn describe(command: Command) -> &'static str {
    match command {
        Command::Help => "Show this help message",
        Command::Clear => "Clear the screen",
        Command::Exit => "End the chat session",
        Command::Raw => "Show the last reply unrendered, markdown intact",
    }
}

/// Write the command and key reference.
pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Commands:").bold())?;
    writeln!(out)?;
    for (command, aliases) in Command::ALIASES {
        let names = aliases.join(", ");
        writeln!(out, "  {:<20} {}", style(names).cyan(), describe(*command))?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", style("Keys:").bold())?;
    writeln!(out)?;
    for (keys, meaning) in [
        ("Enter", "New line"),
        ("Ctrl+Space, Alt+Enter", "Send the message or command"),
        ("Ctrl+C", "Discard what you have typed"),
        ("Ctrl+Q", "End the session (Ctrl+D on an empty prompt)"),
    ] {
        writeln!(out, "  {:<24} {}", style(keys).cyan(), meaning)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Commands are typed on their own and sent like any message.").dim()
    )?;
    writeln!(out)?;
    Ok(())
}

//! In-session command classification.
//!
//! Every submitted block of text is classified before it can reach the
//! transcript. Commands are bare words (no prefix), matched after trimming
//! and lowercasing: `help`, `clear`, `exit`/`q`, `raw`/`markdown`/`md`.

/// In-session commands. None of them touch the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the help text.
    Help,
    /// Clear the terminal viewport.
    Clear,
    /// End the session.
    Exit,
    /// Re-display the last reply without markdown rendering.
    Raw,
}

impl Command {
    /// Every spelling accepted for each command, in help-text order.
    pub const ALIASES: &'static [(Command, &'static [&'static str])] = &[
        (Command::Help, &["help"]),
        (Command::Clear, &["clear"]),
        (Command::Exit, &["exit", "q"]),
        (Command::Raw, &["raw", "markdown", "md"]),
    ];

    fn from_word(word: &str) -> Option<Self> {
        Self::ALIASES
            .iter()
            .find(|(_, aliases)| aliases.contains(&word))
            .map(|(command, _)| *command)
    }
}

/// Result of classifying one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Empty or whitespace-only: nothing to do.
    NoOp,
    /// A recognized in-session command.
    Command(Command),
    /// Text to send. Carried verbatim, untrimmed.
    Message(String),
}

/// Classify a submission.
pub fn classify(input: &str) -> Classified {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Classified::NoOp;
    }

    match Command::from_word(&trimmed.to_lowercase()) {
        Some(command) => Classified::Command(command),
        None => Classified::Message(input.to_string()),
    }
}

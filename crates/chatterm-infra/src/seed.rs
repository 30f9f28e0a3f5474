//! Context seeding from man pages, help output, and source files.
//!
//! Each function returns the full seed text, ready to be folded into the
//! first message of a session. Failures are [`SeedError`]s; the caller
//! shows them as a note and starts the session without a seed.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use chatterm_types::error::SeedError;

/// Seed text for a man page.
pub fn man_page_seed(program: &str, page: &str) -> String {
    format!("Here's the man page for {program}:\n{page}")
}

/// Seed text for `PROGRAM -h` output.
pub fn help_seed(program: &str, output: &str) -> String {
    format!("Here's the help output for {program}:\n{output}")
}

/// Seed text for a source file.
pub fn file_seed(path: &Path, contents: &str) -> String {
    format!(
        "Submitting the contents of {} for assistance. I need help with some code that I am working on.\n{contents}",
        path.display()
    )
}

/// Remove backspace overstrike sequences (`X\bX` bold, `_\bX` underline)
/// that `man` emits for terminals.
pub fn strip_overstrike(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\u{8}' {
            out.pop();
        } else {
            out.push(ch);
        }
    }
    out
}

/// Fetch the man page for `program` as plain text.
#[cfg(not(windows))]
pub async fn man_page(program: &str) -> Result<String, SeedError> {
    let no_page = || SeedError::NoManPage {
        program: program.to_string(),
    };

    let output = Command::new("man")
        .arg(program)
        .env("MANPAGER", "cat")
        .env("PAGER", "cat")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            tracing::debug!("failed to run man: {e}");
            no_page()
        })?;

    if !output.status.success() || output.stdout.is_empty() {
        tracing::debug!(status = ?output.status, "man returned no page for {program}");
        return Err(no_page());
    }

    let page = strip_overstrike(&String::from_utf8_lossy(&output.stdout));
    Ok(man_page_seed(program, &page))
}

#[cfg(windows)]
pub async fn man_page(_program: &str) -> Result<String, SeedError> {
    Err(SeedError::Unsupported)
}

/// Run `program -h` and capture its output (stdout then stderr).
pub async fn help_output(program: &str) -> Result<String, SeedError> {
    let unavailable = || SeedError::HelpUnavailable {
        program: program.to_string(),
    };

    let output = Command::new(program)
        .arg("-h")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            tracing::debug!("failed to run {program} -h: {e}");
            unavailable()
        })?;

    if !output.status.success() {
        tracing::debug!(status = ?output.status, "{program} -h failed");
        return Err(unavailable());
    }

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    if text.trim().is_empty() {
        return Err(unavailable());
    }

    Ok(help_seed(program, &text))
}

/// Read a source file to seed a code-help session.
pub async fn file_contents(path: &Path) -> Result<String, SeedError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(file_seed(path, &contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(SeedError::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(err) => Err(SeedError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        }),
    }
}

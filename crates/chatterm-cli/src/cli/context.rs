//! Context seeding for `--software` and `--code-helper`.
//!
//! Fetches the seed text before the session starts. A failed lookup is not
//! fatal: it becomes a note shown to the user and the session starts
//! unseeded.

use std::path::PathBuf;

use console::style;

use chatterm_infra::seed;
use chatterm_types::error::SeedError;

/// What the user asked to seed the session with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedRequest {
    /// A program's man page (or `-h` output as a fallback).
    Software(String),
    /// A source file.
    File(PathBuf),
}

/// Result of gathering seed context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seed text for the first message, and a note to show the user.
    Seeded { text: String, note: String },
    /// Nothing to seed with. The note replaces the first reply.
    Failed { note: String },
}

/// Fetch seed text, asking before falling back to `PROGRAM -h`.
pub async fn gather(request: &SeedRequest) -> SeedOutcome {
    match request {
        SeedRequest::Software(program) => gather_software(program).await,
        SeedRequest::File(path) => match seed::file_contents(path).await {
            Ok(text) => SeedOutcome::Seeded {
                text,
                note: format!(
                    "The code in {} has been shared. You can now ask questions about it.",
                    path.display()
                ),
            },
            Err(e) => failed(&e),
        },
    }
}

async fn gather_software(program: &str) -> SeedOutcome {
    let software_note =
        "The documentation has been shared. You can now ask questions about the program.";

    match seed::man_page(program).await {
        Ok(text) => {
            return SeedOutcome::Seeded {
                text,
                note: software_note.to_string(),
            };
        }
        Err(SeedError::NoManPage { .. }) => {}
        Err(e) => return failed(&e),
    }

    if !confirm_help_fallback(program) {
        return SeedOutcome::Failed {
            note: format!("Okay, skipping the attempt to run '{program} -h'."),
        };
    }

    match seed::help_output(program).await {
        Ok(text) => SeedOutcome::Seeded {
            text,
            note: software_note.to_string(),
        },
        Err(_) => SeedOutcome::Failed {
            note: format!(
                "No man page entry exists for {program} and it could not be executed with the '-h' flag. Ensure the program is installed and the name is spelled correctly."
            ),
        },
    }
}

fn confirm_help_fallback(program: &str) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(format!(
            "No man page found for {program}. Do you want to try running '{program} -h'?"
        ))
        .default(true)
        .interact()
        .unwrap_or_else(|e| {
            tracing::warn!("confirmation prompt failed: {e}");
            eprintln!("  {} could not ask for confirmation", style("!").yellow().bold());
            false
        })
}

fn failed(error: &SeedError) -> SeedOutcome {
    tracing::warn!("seeding failed: {error}");
    SeedOutcome::Failed {
        note: capitalize(&format!("{error}.")),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when a session starts, showing the model and
//! endpoint and a short guide to the composer keys.

use console::style;

/// Print the welcome banner at the start of an unseeded session.
pub fn print_welcome_banner(model: &str, base_url: &str) {
    println!();
    println!("  {} {}", style("*").cyan(), style("chatterm").cyan().bold());
    println!(
        "  {}",
        style("Chat with OpenAI-compatible models from your terminal.").dim()
    );
    println!();
    println!("  {}     {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Endpoint:").bold(), style(base_url).dim());
    println!();
    println!("  {}", style("Quick guide:").bold());
    println!("  - Type or paste your message. Enter starts a new line.");
    println!("  - Send with Ctrl+Space (or Alt+Enter).");
    println!("  - Ctrl+Q ends the session. Send `help` for commands.");
    println!("  {}", style("---").dim());
    println!();
}

/// Print the confirmation shown after seed context was gathered.
pub fn print_seed_note(note: &str) {
    println!();
    println!("  {} {}", style("Note:").bold(), note);
    println!(
        "  {}",
        style("Send with Ctrl+Space. Send `help` for commands.").dim()
    );
    println!();
}

//! Conversation history types.
//!
//! A [`Transcript`] is the ordered list of [`Turn`]s exchanged so far. The
//! chat-completions API is stateless, so the whole transcript is sent on
//! every call, in insertion order, exactly as stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single role-tagged message in a conversation.
///
/// Serializes to the `{ "role": ..., "content": ... }` shape expected by
/// chat-completions endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only conversation history.
///
/// The optional system turn can only be supplied at construction, so it is
/// always first and never changes. User and assistant turns are appended
/// in conversation order. Alternation is not enforced: when a reply fails,
/// the next user turn simply follows the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript whose first turn is the given system prompt.
    pub fn with_system(prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(prompt)],
        }
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// All turns, in conversation order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_matches_wire_name() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json, serde_json::json!(role.to_string()));
        }
    }

    #[test]
    fn test_turn_serializes_to_wire_shape() {
        let turn = Turn::assistant("Hi there");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "assistant", "content": "Hi there"})
        );
    }

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn test_system_turn_is_first() {
        let mut transcript = Transcript::with_system("Be terse.");
        transcript.push_user("Hello");
        transcript.push_assistant("Hi");

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.turns()[0], Turn::system("Be terse."));
        assert_eq!(transcript.turns()[2], Turn::assistant("Hi"));
    }

    #[test]
    fn test_consecutive_user_turns_are_kept() {
        let mut transcript = Transcript::new();
        transcript.push_user("first");
        transcript.push_user("second");

        let roles: Vec<Role> = transcript.turns().iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::User]);
    }

    #[test]
    fn test_content_is_stored_verbatim() {
        let content = "  fn main() {\n\tprintln!(\"é ✓\");\n}\n";
        let mut transcript = Transcript::new();
        transcript.push_user(content);
        assert_eq!(transcript.turns()[0].content, content);
    }
}

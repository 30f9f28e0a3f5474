//! Shared domain types for chatterm.
//!
//! This crate contains the conversation model (Turn, Transcript), the
//! chat-completions wire shapes, configuration records, and the error
//! taxonomy used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod config;
pub mod error;
pub mod transcript;
pub mod wire;

//! Session engine and port definitions for chatterm.
//!
//! This crate owns the conversation state machine and the traits (ports)
//! it drives: the completion gateway, the input source, the busy
//! indicator, and the view. It depends only on `chatterm-types` -- never
//! on `chatterm-infra` or any HTTP/terminal crate.

pub mod busy;
pub mod command;
pub mod config;
pub mod gateway;
pub mod input;
pub mod session;
pub mod view;

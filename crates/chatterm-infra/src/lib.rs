//! Infrastructure layer for chatterm.
//!
//! Contains the adapters behind the ports defined in `chatterm-core`:
//! the OpenAI-compatible HTTP gateway, `config.toml` loading, credential
//! lookup in the environment, and context seeding from man pages and files.

pub mod config;
pub mod credential;
pub mod gateway;
pub mod seed;

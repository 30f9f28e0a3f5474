//! Observability setup for chatterm: structured logging to stderr.

pub mod tracing_setup;

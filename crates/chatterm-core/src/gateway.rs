//! CompletionGateway trait definition.
//!
//! The session engine talks to the remote endpoint only through this
//! trait. Implementations live in chatterm-infra (e.g.
//! `OpenAiCompatGateway`); tests substitute in-memory gateways.

use std::future::Future;

use chatterm_types::error::GatewayError;
use chatterm_types::wire::PendingRequest;

/// Exchanges a full transcript for one assistant reply.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations make exactly one attempt, never retry, and never
/// substitute a default reply for a failure. They must not mutate the
/// transcript; the caller owns appending.
pub trait CompletionGateway: Send + Sync {
    /// Human-readable gateway name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send the request and return the assistant's text content exactly as
    /// received.
    fn complete(
        &self,
        request: PendingRequest<'_>,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;
}

impl<G: CompletionGateway> CompletionGateway for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete(
        &self,
        request: PendingRequest<'_>,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send {
        (**self).complete(request)
    }
}

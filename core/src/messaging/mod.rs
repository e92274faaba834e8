//! Request/response messaging fabric contract
//!
//! The token service talks to the credential authority through these traits
//! rather than a concrete broker: a typed request goes out, a typed response
//! correlated to it comes back, or the call fails with a `MessagingError`.
//! `gk_infra` provides the channel-backed implementation; tests substitute
//! their own.

use async_trait::async_trait;

use crate::errors::MessagingError;

/// Typed request/response client over the messaging fabric
///
/// One call delivers the request to exactly one consumer of the paired
/// queue and resolves with the correlated response, bounded by the fabric's
/// timeout. Fabric-level failures (timeout, broker outage) are reported as
/// `MessagingError` and are never folded into business outcomes; the
/// response type carries those.
#[async_trait]
pub trait RequestClient<Req, Resp>: Send + Sync {
    /// Sends a request and awaits its correlated response
    async fn request(&self, request: Req) -> Result<Resp, MessagingError>;
}

/// Handler side of a request/response queue
///
/// A consumer must always produce a response: rejections and internal
/// failures are encoded in the response type so the requesting side can
/// tell business failure from fabric trouble.
#[async_trait]
pub trait Consumer<Req, Resp>: Send + Sync {
    /// Processes one request and produces its response
    async fn consume(&self, request: Req) -> Resp;
}

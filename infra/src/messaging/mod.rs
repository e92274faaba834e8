//! In-process request/response message bus
//!
//! Implements the fabric contract from `gk_core::messaging`: typed requests
//! are enveloped with a correlation id, delivered to exactly one consumer
//! task, and the correlated reply resolves the pending call - or a timer
//! resolves it with `Timeout` first. Late replies are dropped.

mod bus;
mod client;

pub use bus::MessageBus;
pub use client::BusRequestClient;

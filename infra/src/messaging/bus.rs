//! Bus construction: queue wiring, consumer workers, reply dispatch

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, Mutex};
use uuid::Uuid;

use gk_core::messaging::Consumer;
use gk_shared::config::MessagingConfig;

use super::client::BusRequestClient;

/// A correlated message travelling through the bus
#[derive(Debug)]
pub(crate) struct Envelope {
    /// Correlation id tying a reply to its request
    pub correlation_id: Uuid,
    /// Serialized message body
    pub payload: serde_json::Value,
}

/// Registry of calls awaiting a correlated reply
pub(crate) type PendingReplies = Arc<Mutex<HashMap<Uuid, oneshot::Sender<serde_json::Value>>>>;

/// In-process message bus
///
/// Owns no queues itself; `attach_consumer` wires one request/reply queue
/// pair per consumer and hands back the client endpoint for it.
#[derive(Debug, Clone)]
pub struct MessageBus {
    config: MessagingConfig,
}

impl MessageBus {
    /// Creates a new bus with the given fabric configuration
    pub fn new(config: MessagingConfig) -> Self {
        Self { config }
    }

    /// Wires a consumer to a fresh queue pair and returns its request client
    ///
    /// Two background tasks are spawned: a receive loop that hands every
    /// request envelope to the consumer on its own task (concurrent
    /// requests do not queue behind a slow exchange), and a reply
    /// dispatcher that completes the pending call matching each reply's
    /// correlation id. Replies whose caller already gave up are dropped
    /// with a warning.
    pub fn attach_consumer<Req, Resp, C>(&self, consumer: Arc<C>) -> BusRequestClient<Req, Resp>
    where
        Req: DeserializeOwned + Send + 'static,
        Resp: Serialize + Send + 'static,
        C: Consumer<Req, Resp> + 'static,
    {
        let (request_tx, mut request_rx) = mpsc::channel::<Envelope>(self.config.queue_capacity);
        let (reply_tx, mut reply_rx) = mpsc::channel::<Envelope>(self.config.queue_capacity);

        // Consumer side: every well-formed request gets exactly one reply.
        tokio::spawn(async move {
            while let Some(envelope) = request_rx.recv().await {
                let consumer = Arc::clone(&consumer);
                let reply_tx = reply_tx.clone();

                tokio::spawn(async move {
                    let correlation_id = envelope.correlation_id;

                    let request: Req = match serde_json::from_value(envelope.payload) {
                        Ok(request) => request,
                        Err(e) => {
                            tracing::error!(
                                %correlation_id,
                                error = %e,
                                "Dropping undecodable request envelope"
                            );
                            return;
                        }
                    };

                    let response = consumer.consume(request).await;

                    let payload = match serde_json::to_value(&response) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::error!(
                                %correlation_id,
                                error = %e,
                                "Failed to encode response"
                            );
                            return;
                        }
                    };

                    if reply_tx
                        .send(Envelope {
                            correlation_id,
                            payload,
                        })
                        .await
                        .is_err()
                    {
                        tracing::warn!(%correlation_id, "Reply queue closed");
                    }
                });
            }
        });

        let pending: PendingReplies = Arc::new(Mutex::new(HashMap::new()));

        // Reply dispatcher: routes each reply to its pending call.
        let dispatcher_pending = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(envelope) = reply_rx.recv().await {
                let sender = dispatcher_pending
                    .lock()
                    .await
                    .remove(&envelope.correlation_id);

                match sender {
                    // The receiver may be gone if the caller was cancelled
                    Some(sender) => {
                        let _ = sender.send(envelope.payload);
                    }
                    None => {
                        tracing::warn!(
                            correlation_id = %envelope.correlation_id,
                            "Dropping reply with no pending request"
                        );
                    }
                }
            }
        });

        BusRequestClient::new(request_tx, pending, self.config.request_timeout_secs)
    }
}

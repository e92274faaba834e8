//! Request client endpoint holding the pending-reply registry

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::time;
use uuid::Uuid;

use gk_core::errors::MessagingError;
use gk_core::messaging::RequestClient;

use super::bus::{Envelope, PendingReplies};

/// Client endpoint for one request/reply queue pair
///
/// Cloneable; all clones share the queue and the pending registry, so any
/// number of concurrent callers can have requests in flight.
pub struct BusRequestClient<Req, Resp> {
    requests: mpsc::Sender<Envelope>,
    pending: PendingReplies,
    timeout: Duration,
    timeout_secs: u64,
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> BusRequestClient<Req, Resp> {
    pub(crate) fn new(
        requests: mpsc::Sender<Envelope>,
        pending: PendingReplies,
        timeout_secs: u64,
    ) -> Self {
        Self {
            requests,
            pending,
            timeout: Duration::from_secs(timeout_secs),
            timeout_secs,
            _marker: PhantomData,
        }
    }
}

impl<Req, Resp> Clone for BusRequestClient<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            pending: Arc::clone(&self.pending),
            timeout: self.timeout,
            timeout_secs: self.timeout_secs,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<Req, Resp> RequestClient<Req, Resp> for BusRequestClient<Req, Resp>
where
    Req: Serialize + Send + Sync + 'static,
    Resp: DeserializeOwned + Send + 'static,
{
    /// Sends a request and awaits its correlated reply, bounded by the
    /// configured timeout
    ///
    /// The call registers a oneshot sender under a fresh correlation id,
    /// ships the enveloped request, and waits. On timeout the registry
    /// entry is removed so the eventual late reply has nowhere to land and
    /// is dropped by the dispatcher.
    async fn request(&self, request: Req) -> Result<Resp, MessagingError> {
        let correlation_id = Uuid::new_v4();

        let payload =
            serde_json::to_value(&request).map_err(|e| MessagingError::Serialization {
                message: format!("Failed to encode request: {}", e),
            })?;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending.lock().await.insert(correlation_id, reply_tx);

        tracing::debug!(%correlation_id, "Sending request");

        if self
            .requests
            .send(Envelope {
                correlation_id,
                payload,
            })
            .await
            .is_err()
        {
            self.pending.lock().await.remove(&correlation_id);
            return Err(MessagingError::BrokerUnavailable {
                message: "request queue closed".to_string(),
            });
        }

        match time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(payload)) => {
                serde_json::from_value(payload).map_err(|e| MessagingError::Serialization {
                    message: format!("Failed to decode response: {}", e),
                })
            }
            Ok(Err(_)) => {
                self.pending.lock().await.remove(&correlation_id);
                Err(MessagingError::BrokerUnavailable {
                    message: "reply channel closed".to_string(),
                })
            }
            Err(_) => {
                // Deregister so the dispatcher drops the late reply
                self.pending.lock().await.remove(&correlation_id);
                tracing::warn!(
                    %correlation_id,
                    timeout_secs = self.timeout_secs,
                    "Request timed out"
                );
                Err(MessagingError::Timeout {
                    timeout_secs: self.timeout_secs,
                })
            }
        }
    }
}

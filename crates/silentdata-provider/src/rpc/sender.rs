/*
[INPUT]:  Concurrent RPC calls, some requiring signatures
[OUTPUT]: Results delivered in FIFO order through one signing session
[POS]:    RPC layer - request serialization over the signed path
[UPDATE]: When session gating or queue semantics change
*/

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{Result, SilentDataError};
use crate::rpc::provider::SilentDataProvider;

struct QueuedCall {
    method: String,
    params: Value,
    reply: oneshot::Sender<Result<Value>>,
}

#[derive(Default)]
struct SessionState {
    in_flight: bool,
    queue: VecDeque<QueuedCall>,
}

/// Funnels signable calls through a single in-flight signing session.
///
/// Signing is slow and refreshes shared cached state (the delegate
/// headers); two signed calls racing on that cache would interleave
/// headers and invalidate signatures. Only one signed round-trip may be
/// establishing state at a time; everything else queues behind it and is
/// replayed FIFO once the session completes. Non-signable calls, and
/// signed calls made while the cached delegate session is still valid,
/// bypass the gate entirely.
#[derive(Clone)]
pub struct Sender {
    provider: Arc<SilentDataProvider>,
    state: Arc<Mutex<SessionState>>,
}

impl Sender {
    pub fn new(provider: Arc<SilentDataProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub fn provider(&self) -> &Arc<SilentDataProvider> {
        &self.provider
    }

    /// Send an RPC call, queueing behind the active signing session when
    /// one is in flight
    pub async fn send(&self, method: &str, params: Value) -> Result<Value> {
        if !self.provider.requires_auth(method, &params) || self.provider.session_valid() {
            return self.provider.send(method, params).await;
        }

        let queued = {
            let mut state = self.state.lock().unwrap();
            if state.in_flight {
                let (reply, rx) = oneshot::channel();
                state.queue.push_back(QueuedCall {
                    method: method.to_string(),
                    params,
                    reply,
                });
                debug!(method, queued = state.queue.len(), "queued behind signing session");
                Err(rx)
            } else {
                state.in_flight = true;
                Ok(params)
            }
        };

        let params = match queued {
            Err(rx) => {
                return rx.await.map_err(|_| {
                    SilentDataError::InvalidResponse(
                        "signing session dropped queued call".to_string(),
                    )
                })?;
            }
            Ok(params) => params,
        };

        let result = self.provider.send(method, params).await;
        self.drain_queue().await;
        result
    }

    /// Replay queued calls strictly FIFO. Each performs its own full
    /// signing round-trip; one call's failure never aborts the rest.
    /// The in-flight flag stays set until the queue is observed empty,
    /// so calls arriving mid-drain queue behind it.
    async fn drain_queue(&self) {
        loop {
            let next = {
                let mut state = self.state.lock().unwrap();
                match state.queue.pop_front() {
                    Some(call) => call,
                    None => {
                        state.in_flight = false;
                        break;
                    }
                }
            };

            let result = self.provider.send(&next.method, next.params).await;
            // receiver may have been dropped; nothing to do then
            let _ = next.reply.send(result);
        }
    }
}

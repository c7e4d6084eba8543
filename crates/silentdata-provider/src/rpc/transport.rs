/*
[INPUT]:  RPC payloads and computed auth/delegate headers
[OUTPUT]: JSON-RPC results from the target endpoint
[POS]:    RPC layer - HTTP transport adapter
[UPDATE]: When header injection or envelope handling changes
*/

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::trace;

use crate::error::{Result, SilentDataError};
use crate::types::{AuthHeaders, DelegateHeaders, RpcErrorObject, RpcPayload};

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// HTTP JSON-RPC transport.
///
/// A fresh request is built for every call, so one call's headers can
/// never bleed into another in-flight call's request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    pub fn new(rpc_url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            url: Url::parse(rpc_url)?,
        })
    }

    /// Send one payload, attaching any computed headers
    pub async fn send(
        &self,
        payload: &RpcPayload,
        auth: Option<&AuthHeaders>,
        delegate: Option<&DelegateHeaders>,
    ) -> Result<Value> {
        let mut request = self.client.post(self.url.clone()).json(payload);

        if let Some(delegate) = delegate {
            for (name, value) in delegate.header_pairs() {
                request = request.header(name, value);
            }
        }
        if let Some(auth) = auth {
            for (name, value) in auth.header_pairs() {
                request = request.header(name, value);
            }
        }

        trace!(method = %payload.method, id = payload.id, signed = auth.is_some(), "sending RPC request");
        let response = request.send().await?.error_for_status()?;
        let envelope: RpcResponse = response.json().await?;

        if let Some(error) = envelope.error {
            return Err(SilentDataError::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

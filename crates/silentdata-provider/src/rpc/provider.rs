/*
[INPUT]:  Provider configuration, signer backend and RPC method calls
[OUTPUT]: JSON-RPC results with auth headers attached where required
[POS]:    RPC layer - provider facade over the auth pipeline
[UPDATE]: When the send path or provider surface changes
*/

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_json_abi::JsonAbi;
use serde_json::Value;
use tracing::debug;

use crate::auth::{
    AuthHeaderBuilder, DelegateManager, RequestSigner, SignaturePolicy, WalletSigner,
};
use crate::error::{Result, SilentDataError};
use crate::rpc::nonce::NonceTracker;
use crate::rpc::transport::HttpTransport;
use crate::types::{Network, ProviderConfig, RpcPayload, SignatureType};

/// JSON-RPC provider that signs private-state requests.
///
/// Owns the signature policy, the delegate credential cache and the nonce
/// tracker for exactly one endpoint; instances never share mutable state.
pub struct SilentDataProvider {
    network: Network,
    chain_id: u64,
    signer: Arc<dyn RequestSigner>,
    policy: RwLock<SignaturePolicy>,
    delegate: Arc<DelegateManager>,
    header_builder: AuthHeaderBuilder,
    transport: HttpTransport,
    next_id: AtomicU64,
    nonces: NonceTracker,
}

impl std::fmt::Debug for SilentDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SilentDataProvider")
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl SilentDataProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.rpc_url.is_empty() {
            return Err(SilentDataError::Config("rpcUrl is mandatory".to_string()));
        }

        let signer: Arc<dyn RequestSigner> = match (&config.signer, &config.private_key) {
            (Some(signer), _) => signer.clone(),
            (None, Some(private_key)) => Arc::new(WalletSigner::new(private_key)?),
            (None, None) => {
                return Err(SilentDataError::Config(
                    "signer or privateKey is mandatory".to_string(),
                ));
            }
        };

        let mut policy = SignaturePolicy::with_extra_methods(config.extra_sign_methods.clone());
        policy.set_methods_to_sign(config.methods_to_sign.clone());

        let delegate = Arc::new(DelegateManager::new(config.delegate.clone()));
        let header_builder =
            AuthHeaderBuilder::new(config.auth_signature_type, delegate.clone());
        let transport =
            HttpTransport::new(&config.rpc_url, config.timeout, config.connect_timeout)?;

        debug!(network = ?config.network, chain_id = config.effective_chain_id(), "provider initialized");

        Ok(Self {
            network: config.network,
            chain_id: config.effective_chain_id(),
            signer,
            policy: RwLock::new(policy),
            delegate,
            header_builder,
            transport,
            next_id: AtomicU64::new(1),
            nonces: NonceTracker::new(),
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Chain id from configuration (no network round-trip)
    pub fn configured_chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn signer(&self) -> &Arc<dyn RequestSigner> {
        &self.signer
    }

    pub fn signature_type(&self) -> SignatureType {
        self.header_builder.signature_type()
    }

    /// Set the contract ABI and method names whose `eth_call`s require
    /// auth headers
    pub fn set_contract(&self, abi: JsonAbi, methods_to_sign: Vec<String>) {
        self.policy.write().unwrap().set_contract(abi, methods_to_sign);
    }

    /// Whether this call would carry auth headers
    pub fn requires_auth(&self, method: &str, params: &Value) -> bool {
        // classification ignores the request id
        let probe = RpcPayload::new(0, method, params.clone());
        self.policy.read().unwrap().requires_auth(&probe)
    }

    /// Whether the cached delegate session is still valid
    pub fn session_valid(&self) -> bool {
        self.delegate.session_valid()
    }

    /// Drop cached delegate credentials and issued nonces; the next
    /// signed call re-establishes the session from scratch
    pub fn reset_session(&self) {
        debug!("resetting provider session");
        self.delegate.reset();
        self.nonces.reset();
    }

    /// Send one RPC call, signing it if the policy requires
    pub async fn send(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.send_rpc(RpcPayload::new(id, method, params)).await
    }

    /// Send a raw payload value. Batched (array) payloads are rejected
    /// before any signing or network work.
    pub async fn send_payload(&self, payload: Value) -> Result<Value> {
        if payload.is_array() {
            return Err(SilentDataError::UnsupportedOperation(
                "batch requests are not currently supported".to_string(),
            ));
        }
        let payload: RpcPayload = serde_json::from_value(payload)?;
        self.send_rpc(payload).await
    }

    async fn send_rpc(&self, payload: RpcPayload) -> Result<Value> {
        let requires_auth = self.policy.read().unwrap().requires_auth(&payload);
        if !requires_auth {
            return self.transport.send(&payload, None, None).await;
        }

        debug!(method = %payload.method, id = payload.id, "request requires auth headers");
        let delegate_headers = if self.delegate.enabled() {
            Some(
                self.delegate
                    .delegate_headers(self.signer.as_ref(), self.signature_type())
                    .await?,
            )
        } else {
            None
        };

        let auth_headers = self
            .header_builder
            .auth_headers(&self.signer, &payload)
            .await?;

        self.transport
            .send(&payload, Some(&auth_headers), delegate_headers.as_ref())
            .await
    }

    /// Next safe nonce for `address`: the local high-water mark checked
    /// against the network's current transaction count
    pub async fn next_nonce(&self, address: &str) -> Result<u64> {
        let network_nonce = self.get_transaction_count(address, "latest").await?;
        Ok(self.nonces.next(address, network_nonce))
    }
}

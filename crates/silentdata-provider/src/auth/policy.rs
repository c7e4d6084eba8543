/*
[INPUT]:  JSON-RPC payloads, allow-lists and an optional contract ABI
[OUTPUT]: Per-call decision whether auth headers are required
[POS]:    Auth layer - signature policy
[UPDATE]: When the signable-method contract or selector matching changes
*/

use alloy_json_abi::JsonAbi;
use tracing::debug;

use crate::types::{RpcPayload, SIGN_RPC_METHODS};

/// Decides, per call, whether auth headers are required.
///
/// The core allow-list ([`SIGN_RPC_METHODS`]) is fixed; integrations may
/// widen it (`extra_methods`), and `eth_call`s are matched against the
/// configured contract methods by 4-byte selector.
#[derive(Debug, Default, Clone)]
pub struct SignaturePolicy {
    extra_methods: Vec<String>,
    contract_abi: Option<JsonAbi>,
    methods_to_sign: Vec<String>,
}

impl SignaturePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Policy with integration-widened allow-list additions
    pub fn with_extra_methods(extra_methods: Vec<String>) -> Self {
        Self {
            extra_methods,
            ..Self::default()
        }
    }

    /// Set the contract ABI and the method names requiring signing
    pub fn set_contract(&mut self, abi: JsonAbi, methods_to_sign: Vec<String>) {
        self.contract_abi = Some(abi);
        self.methods_to_sign = methods_to_sign;
    }

    /// Seed the signable contract-method list without an ABI yet
    pub fn set_methods_to_sign(&mut self, methods_to_sign: Vec<String>) {
        self.methods_to_sign = methods_to_sign;
    }

    /// Whether this call must carry auth headers
    pub fn requires_auth(&self, payload: &RpcPayload) -> bool {
        if SIGN_RPC_METHODS.contains(&payload.method.as_str()) {
            return true;
        }
        if self.extra_methods.iter().any(|m| m == &payload.method) {
            return true;
        }
        self.is_signable_contract_call(payload)
    }

    /// Whether an `eth_call` targets a contract method that requires
    /// an authenticated `msg.sender`.
    ///
    /// Malformed params, a missing ABI, or an empty allow-list all
    /// classify as "unsigned": an unsigned private call simply fails
    /// server-side auth, it never silently succeeds with wrong auth.
    fn is_signable_contract_call(&self, payload: &RpcPayload) -> bool {
        let (Some(abi), false) = (&self.contract_abi, self.methods_to_sign.is_empty()) else {
            return false;
        };

        if payload.method != "eth_call" {
            return false;
        }

        let Some(call) = payload.params.as_array().and_then(|p| p.first()) else {
            debug!("eth_call with missing params, treating as unsigned");
            return false;
        };
        let Some(data) = call.get("data").and_then(|d| d.as_str()) else {
            debug!("eth_call without call data, treating as unsigned");
            return false;
        };
        if !data.starts_with("0x") || data.len() < 10 {
            return false;
        }
        let selector = data[2..10].to_lowercase();

        // Selector comparison only; overloaded methods sharing a name all
        // count as signable.
        let signable = abi
            .functions()
            .any(|f| self.methods_to_sign.contains(&f.name) && hex::encode(f.selector()) == selector);

        debug!(method = %payload.method, selector = %selector, signable, "contract call classified");
        signable
    }
}

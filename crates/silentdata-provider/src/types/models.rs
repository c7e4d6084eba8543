/*
[INPUT]:  JSON-RPC payloads and computed signature material
[OUTPUT]: Wire-level request and header types
[POS]:    Data layer - canonical signed structures
[UPDATE]: When the signed wire contract changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::constants::{
    HEADER_DELEGATE, HEADER_DELEGATE_SIGNATURE, HEADER_EIP712_DELEGATE_SIGNATURE,
    HEADER_EIP712_SIGNATURE, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};

/// A single JSON-RPC request.
///
/// The serialized bytes of this struct (plus the timestamp) are what gets
/// signed, so the field order below is part of the security contract and
/// must never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcPayload {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl RpcPayload {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// Auth headers attached to a signed request.
///
/// `timestamp` is always present; exactly one of the signature fields is
/// populated, matching the active signature scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthHeaders {
    pub timestamp: String,
    pub signature: Option<String>,
    pub eip712_signature: Option<String>,
}

impl AuthHeaders {
    /// Header name/value pairs, in wire order
    pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(HEADER_TIMESTAMP, self.timestamp.clone())];
        if let Some(signature) = &self.signature {
            pairs.push((HEADER_SIGNATURE, signature.clone()));
        }
        if let Some(signature) = &self.eip712_signature {
            pairs.push((HEADER_EIP712_SIGNATURE, signature.clone()));
        }
        pairs
    }
}

/// Authorization from the primary signer to an ephemeral signer.
///
/// Serialized field order is the canonical form both sides verify against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegateTicket {
    pub expires: String,
    #[serde(rename = "ephemeralAddress")]
    pub ephemeral_address: String,
}

/// Delegate headers attached alongside auth headers when delegation is on.
///
/// `delegate` carries the JSON-serialized [`DelegateTicket`]; the signature
/// field matching the active scheme carries the primary signer's signature
/// over the ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegateHeaders {
    pub delegate: String,
    pub delegate_signature: Option<String>,
    pub eip712_delegate_signature: Option<String>,
}

impl DelegateHeaders {
    /// Header name/value pairs, in wire order
    pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(HEADER_DELEGATE, self.delegate.clone())];
        if let Some(signature) = &self.delegate_signature {
            pairs.push((HEADER_DELEGATE_SIGNATURE, signature.clone()));
        }
        if let Some(signature) = &self.eip712_delegate_signature {
            pairs.push((HEADER_EIP712_DELEGATE_SIGNATURE, signature.clone()));
        }
        pairs
    }
}

/// JSON-RPC error object, propagated verbatim to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

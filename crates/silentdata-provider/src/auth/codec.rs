/*
[INPUT]:  RPC payloads, delegate tickets and ISO-8601 timestamps
[OUTPUT]: Canonical signing messages (raw string, EIP-191 hash, EIP-712 typed data)
[POS]:    Auth layer - message canonicalization
[UPDATE]: When the signed message format or EIP-712 type set changes
*/

use alloy_dyn_abi::TypedData;
use alloy_primitives::utils::eip191_hash_message;
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::error::Result;
use crate::types::{DelegateTicket, EIP712_DOMAIN_NAME, EIP712_DOMAIN_VERSION, RpcPayload};

/// Current time as an ISO-8601 string with millisecond precision,
/// the format used both in the `x-timestamp` header and inside the
/// signed message.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonical JSON form of a payload.
///
/// Serialization follows the struct's declared field order; both client
/// and server must agree on these bytes exactly.
pub fn canonical_payload(payload: &RpcPayload) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// Message signed for the `x-signature` header: canonical payload JSON
/// with the timestamp appended.
pub fn raw_message(payload: &RpcPayload, timestamp: &str) -> Result<String> {
    let serial_request = canonical_payload(payload)?;
    Ok(format!("{serial_request}{timestamp}"))
}

/// EIP-191 personal-message hash of a canonical message, as a hex body
/// without the `0x` prefix. This is the content submitted to custodial
/// signers for out-of-band raw signing.
pub fn eip191_content(message: &str) -> String {
    hex::encode(eip191_hash_message(message.as_bytes()))
}

/// Typed-data structure signed for the `x-eip712-signature` header.
///
/// `params` is JSON-stringified inside the message so the type set stays
/// fixed regardless of the call's parameter shape.
pub fn auth_typed_data(payload: &RpcPayload, timestamp: &str) -> Result<TypedData> {
    let value = json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
            ],
            "Call": [
                { "name": "request", "type": "JsonRPCRequest" },
                { "name": "timestamp", "type": "string" },
            ],
            "JsonRPCRequest": [
                { "name": "jsonrpc", "type": "string" },
                { "name": "method", "type": "string" },
                { "name": "params", "type": "string" },
                { "name": "id", "type": "uint256" },
            ],
        },
        "primaryType": "Call",
        "domain": {
            "name": EIP712_DOMAIN_NAME,
            "version": EIP712_DOMAIN_VERSION,
        },
        "message": {
            "request": {
                "jsonrpc": payload.jsonrpc,
                "method": payload.method,
                "params": serde_json::to_string(&payload.params)?,
                "id": payload.id,
            },
            "timestamp": timestamp,
        },
    });

    Ok(serde_json::from_value(value)?)
}

/// Typed-data structure for a delegate ticket, signed by the primary
/// signer to authorize the ephemeral key.
pub fn delegate_typed_data(ticket: &DelegateTicket) -> Result<TypedData> {
    let value = json!({
        "types": {
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
            ],
            "Ticket": [
                { "name": "expires", "type": "string" },
                { "name": "ephemeralAddress", "type": "string" },
            ],
        },
        "primaryType": "Ticket",
        "domain": {
            "name": EIP712_DOMAIN_NAME,
            "version": EIP712_DOMAIN_VERSION,
        },
        "message": ticket,
    });

    Ok(serde_json::from_value(value)?)
}

/*
[INPUT]:  Fireblocks REST API payloads and responses
[OUTPUT]: Typed request/response models and integration configuration
[POS]:    Types layer - Fireblocks wire contract
[UPDATE]: When the Fireblocks transaction API shape changes
*/

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_MAX_RETRIES, DEFAULT_POLLING_INTERVAL, SIGNING_POLL_INTERVAL,
};

/// Fireblocks transaction operation kinds used by the signer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionOperation {
    #[serde(rename = "RAW")]
    Raw,
    #[serde(rename = "TYPED_MESSAGE")]
    TypedMessage,
}

/// Lifecycle states of a Fireblocks transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Submitted,
    Queued,
    PendingAuthorization,
    PendingSignature,
    Broadcasting,
    Confirming,
    Completed,
    Cancelling,
    Cancelled,
    Blocked,
    Rejected,
    Failed,
    Timeout,
}

impl TransactionStatus {
    /// States from which the transaction can never reach `Completed`
    pub fn is_terminal_failure(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Cancelling
                | TransactionStatus::Cancelled
                | TransactionStatus::Blocked
                | TransactionStatus::Rejected
                | TransactionStatus::Failed
                | TransactionStatus::Timeout
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TransactionStatus::Submitted => "SUBMITTED",
            TransactionStatus::Queued => "QUEUED",
            TransactionStatus::PendingAuthorization => "PENDING_AUTHORIZATION",
            TransactionStatus::PendingSignature => "PENDING_SIGNATURE",
            TransactionStatus::Broadcasting => "BROADCASTING",
            TransactionStatus::Confirming => "CONFIRMING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Cancelling => "CANCELLING",
            TransactionStatus::Cancelled => "CANCELLED",
            TransactionStatus::Blocked => "BLOCKED",
            TransactionStatus::Rejected => "REJECTED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Timeout => "TIMEOUT",
        };
        write!(f, "{text}")
    }
}

/// Transaction source: a vault account by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub id: String,
}

impl VaultSource {
    pub fn vault_account(id: impl Into<String>) -> Self {
        Self {
            source_type: "VAULT_ACCOUNT".to_string(),
            id: id.into(),
        }
    }
}

/// One message to sign. `content` is a hex digest for RAW operations or
/// the full typed-data object for TYPED_MESSAGE ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    pub content: Value,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessageData {
    pub messages: Vec<RawMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraParameters {
    pub raw_message_data: RawMessageData,
}

/// Body of `POST /v1/transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionArguments {
    pub operation: TransactionOperation,
    pub asset_id: String,
    pub source: VaultSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub extra_parameters: ExtraParameters,
}

/// Secp256k1 signature components returned per signed message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureParts {
    pub r: String,
    pub s: String,
    pub v: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedMessage {
    pub signature: SignatureParts,
}

/// Response of `POST /v1/transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    pub id: String,
    pub status: TransactionStatus,
}

/// Response of `GET /v1/transactions/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub signed_messages: Option<Vec<SignedMessage>>,
}

/// One address inside a vault account, from
/// `GET /v1/vault/accounts/{id}/{asset}/addresses`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultAddress {
    pub address: String,
}

/// Fireblocks integration configuration
#[derive(Debug, Clone)]
pub struct FireblocksConfig {
    pub api_key: String,
    pub api_url: String,
    pub vault_account_id: String,
    pub asset_id: String,
    /// Receipt polling attempts before `TransactionNotMined`
    pub max_retries: u32,
    /// Delay between receipt polls
    pub polling_interval: Duration,
    /// Delay between signing status polls
    pub signing_poll_interval: Duration,
}

impl FireblocksConfig {
    pub fn new(
        api_key: impl Into<String>,
        vault_account_id: impl Into<String>,
        asset_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            vault_account_id: vault_account_id.into(),
            asset_id: asset_id.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            signing_poll_interval: SIGNING_POLL_INTERVAL,
        }
    }
}

/*
[INPUT]:  Error sources (HTTP, RPC endpoint, signing, configuration)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for the SDK
[UPDATE]: When adding new error sources or improving error messages
*/

use serde_json::Value;
use thiserror::Error;

/// Main error type for the Silent Data provider SDK
#[derive(Error, Debug)]
pub enum SilentDataError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The RPC endpoint returned a JSON-RPC error object
    #[error("RPC error (code {code}): {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation the provider refuses to perform (e.g. batched payloads)
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Configured signature scheme has no signing path
    #[error("unsupported signature type: {0}")]
    UnsupportedSignatureType(String),

    /// Delegate retrieval or ticket signing failed
    #[error("failed to get delegate signer: {0}")]
    DelegateProvisioning(String),

    /// Local signer failed to produce a signature
    #[error("signing failed: {0}")]
    Signing(String),

    /// Custodial signer reported a terminal non-success status
    #[error("remote signer failure: tx id {tx_id} {status}")]
    RemoteSigning { tx_id: String, status: String },

    /// Receipt-wait loop exhausted its retries
    #[error("transaction was not mined within the expected timeframe")]
    TransactionNotMined,

    /// Transaction was mined but reverted
    #[error("transaction {tx_hash} failed")]
    TransactionFailed { tx_hash: String },

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Response shape the client cannot interpret
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SilentDataError {
    /// Check if the error originates from the signing pipeline rather
    /// than the transport
    pub fn is_signing_error(&self) -> bool {
        matches!(
            self,
            SilentDataError::Signing(_)
                | SilentDataError::RemoteSigning { .. }
                | SilentDataError::DelegateProvisioning(_)
                | SilentDataError::UnsupportedSignatureType(_)
        )
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SilentDataError>;

/*
[INPUT]:  Messages, typed data and transaction hashes to sign
[OUTPUT]: Hex signatures produced by the Fireblocks vault
[POS]:    Signer layer - custodial RequestSigner backend
[UPDATE]: When the submit-then-poll protocol or repacking changes
*/

use std::sync::Arc;

use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use silentdata_provider::auth::codec;
use silentdata_provider::{RequestSigner, Result, SilentDataError};

use crate::api::FireblocksApi;
use crate::types::{
    ExtraParameters, FireblocksConfig, RawMessage, RawMessageData, SignatureParts,
    TransactionArguments, TransactionOperation, TransactionStatus, VaultSource,
};

/// `RequestSigner` backed by a Fireblocks vault account.
///
/// Every signature is a Fireblocks transaction: submitted, then polled
/// until the vault's approval flow completes. Personal messages are
/// hashed locally (EIP-191) and submitted as RAW content; typed data is
/// submitted whole as a TYPED_MESSAGE so the vault can display it.
pub struct FireblocksSigner {
    api: Arc<dyn FireblocksApi>,
    address: Address,
    asset_id: String,
    source: VaultSource,
    signing_poll_interval: std::time::Duration,
}

impl std::fmt::Debug for FireblocksSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireblocksSigner")
            .field("address", &self.address)
            .field("asset_id", &self.asset_id)
            .field("source", &self.source)
            .field("signing_poll_interval", &self.signing_poll_interval)
            .finish_non_exhaustive()
    }
}

impl FireblocksSigner {
    /// Resolve the vault account's deposit address and build the signer
    pub async fn connect(api: Arc<dyn FireblocksApi>, config: &FireblocksConfig) -> Result<Self> {
        let addresses = api
            .vault_addresses(&config.vault_account_id, &config.asset_id)
            .await?;
        let first = addresses.first().ok_or_else(|| {
            SilentDataError::Config(format!(
                "vault account {} has no {} addresses",
                config.vault_account_id, config.asset_id
            ))
        })?;
        let address: Address = first.address.parse().map_err(|e| {
            SilentDataError::Config(format!("invalid vault address {}: {e}", first.address))
        })?;
        debug!(%address, vault = %config.vault_account_id, "fireblocks signer connected");

        Ok(Self {
            api,
            address,
            asset_id: config.asset_id.clone(),
            source: VaultSource::vault_account(config.vault_account_id.clone()),
            signing_poll_interval: config.signing_poll_interval,
        })
    }

    /// Sign a 32-byte digest (e.g. a transaction signature hash) as RAW
    /// content
    pub async fn sign_digest(&self, digest: B256) -> Result<String> {
        let args = self.raw_arguments(hex::encode(digest));
        self.submit_and_poll(args).await
    }

    fn raw_arguments(&self, content_hex: String) -> TransactionArguments {
        TransactionArguments {
            operation: TransactionOperation::Raw,
            asset_id: self.asset_id.clone(),
            source: self.source.clone(),
            note: None,
            extra_parameters: ExtraParameters {
                raw_message_data: RawMessageData {
                    messages: vec![RawMessage {
                        content: json!(content_hex),
                        message_type: None,
                    }],
                },
            },
        }
    }

    /// Submit the signing transaction and poll until it completes.
    ///
    /// The loop is deliberately unbounded: a pending signature may sit in
    /// the vault's approval queue indefinitely, and abandoning the poll
    /// would orphan an approval that later completes. Terminal failure
    /// states end the wait with an error naming the transaction.
    async fn submit_and_poll(&self, args: TransactionArguments) -> Result<String> {
        let created = self.api.create_transaction(&args).await?;
        debug!(tx_id = %created.id, status = %created.status, "signing transaction submitted");

        loop {
            tokio::time::sleep(self.signing_poll_interval).await;
            let info = self.api.get_transaction(&created.id).await?;

            if info.status == TransactionStatus::Completed {
                let signed = info
                    .signed_messages
                    .as_deref()
                    .and_then(|messages| messages.first())
                    .ok_or_else(|| {
                        SilentDataError::InvalidResponse(format!(
                            "completed transaction {} has no signed messages",
                            info.id
                        ))
                    })?;
                return Ok(repack_signature(&signed.signature));
            }

            if info.status.is_terminal_failure() {
                return Err(SilentDataError::RemoteSigning {
                    tx_id: info.id,
                    status: info.status.to_string(),
                });
            }

            debug!(tx_id = %info.id, status = %info.status, "waiting for custodial signature");
        }
    }
}

/// Assemble the 65-byte hex signature from Fireblocks' split components,
/// converting the recovery id to the Electrum-style 27/28 encoding
fn repack_signature(parts: &SignatureParts) -> String {
    let r = parts.r.strip_prefix("0x").unwrap_or(&parts.r);
    let s = parts.s.strip_prefix("0x").unwrap_or(&parts.s);
    format!("0x{r}{s}{:02x}", 27 + parts.v)
}

#[async_trait]
impl RequestSigner for FireblocksSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let args = self.raw_arguments(codec::eip191_content(message));
        self.submit_and_poll(args).await
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String> {
        let args = TransactionArguments {
            operation: TransactionOperation::TypedMessage,
            asset_id: self.asset_id.clone(),
            source: self.source.clone(),
            note: None,
            extra_parameters: ExtraParameters {
                raw_message_data: RawMessageData {
                    messages: vec![RawMessage {
                        content: serde_json::to_value(typed_data)?,
                        message_type: Some("EIP712".to_string()),
                    }],
                },
            },
        };
        self.submit_and_poll(args).await
    }
}

/*
[INPUT]:  Provider configuration, Fireblocks credentials and transactions
[OUTPUT]: Silent Data provider with custodial signing and tx broadcast
[POS]:    Provider layer - Fireblocks integration facade
[UPDATE]: When the transaction build/broadcast pipeline changes
*/

use std::sync::Arc;

use alloy_consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, Signature, TxKind, U256};
use serde_json::{Value, json};
use tracing::{debug, info};

use silentdata_provider::{
    ProviderConfig, RequestSigner, Result, SilentDataError, SilentDataProvider,
};

use crate::api::{FireblocksApi, HttpFireblocksApi};
use crate::constants::FIREBLOCKS_EXTRA_SIGN_METHODS;
use crate::signer::FireblocksSigner;
use crate::types::FireblocksConfig;

/// Silent Data provider whose signatures come from a Fireblocks vault.
///
/// Beyond routing request auth through the custodial signer, this widens
/// the signing policy with `eth_call` and adds the full transaction
/// pipeline: build, custodial sign, broadcast, wait for the receipt.
pub struct SilentDataFireblocksProvider {
    provider: Arc<SilentDataProvider>,
    signer: Arc<FireblocksSigner>,
    max_retries: u32,
    polling_interval: std::time::Duration,
}

impl SilentDataFireblocksProvider {
    /// Connect to the Fireblocks REST API and build the provider
    pub async fn connect(
        provider_config: ProviderConfig,
        fireblocks: FireblocksConfig,
    ) -> Result<Self> {
        let api = Arc::new(HttpFireblocksApi::new(&fireblocks.api_url, &fireblocks.api_key)?);
        Self::with_api(provider_config, fireblocks, api).await
    }

    /// Build the provider over an existing API client
    pub async fn with_api(
        mut provider_config: ProviderConfig,
        fireblocks: FireblocksConfig,
        api: Arc<dyn FireblocksApi>,
    ) -> Result<Self> {
        let signer = Arc::new(FireblocksSigner::connect(api, &fireblocks).await?);
        provider_config.signer = Some(signer.clone());
        for method in FIREBLOCKS_EXTRA_SIGN_METHODS {
            if !provider_config.extra_sign_methods.iter().any(|m| m == method) {
                provider_config.extra_sign_methods.push(method.to_string());
            }
        }

        let provider = Arc::new(SilentDataProvider::new(provider_config)?);
        Ok(Self {
            provider,
            signer,
            max_retries: fireblocks.max_retries,
            polling_interval: fireblocks.polling_interval,
        })
    }

    pub fn provider(&self) -> &Arc<SilentDataProvider> {
        &self.provider
    }

    pub fn signer(&self) -> &Arc<FireblocksSigner> {
        &self.signer
    }

    /// Build, custodially sign and broadcast an EIP-1559 transaction,
    /// then wait for its receipt
    pub async fn send_transaction(&self, to: Address, value: U256, data: Bytes) -> Result<Value> {
        let from = self.signer.address().to_checksum(None);
        let nonce = self.provider.next_nonce(&from).await?;
        let (max_priority_fee, max_fee) = self.provider.fee_data().await?;
        let gas_limit = self
            .provider
            .estimate_gas(&json!({
                "from": from,
                "to": to.to_checksum(None),
                "value": format!("0x{value:x}"),
                "data": format!("0x{}", hex::encode(&data)),
            }))
            .await?;

        let tx = TxEip1559 {
            chain_id: self.provider.configured_chain_id(),
            nonce,
            gas_limit,
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: max_priority_fee,
            to: TxKind::Call(to),
            value,
            input: data,
            ..Default::default()
        };

        debug!(nonce, gas_limit, "signing transaction via vault");
        let signature_hex = self.signer.sign_digest(tx.signature_hash()).await?;
        let signature: Signature = signature_hex
            .parse()
            .map_err(|e| SilentDataError::Signing(format!("invalid vault signature: {e}")))?;

        let envelope = TxEnvelope::Eip1559(tx.into_signed(signature));
        let raw = format!("0x{}", hex::encode(envelope.encoded_2718()));
        let tx_hash = self.provider.send_raw_transaction(&raw).await?;
        info!(%tx_hash, "transaction broadcast");

        self.wait_for_transaction(&tx_hash).await
    }

    /// Poll for the receipt until it appears or retries are exhausted
    pub async fn wait_for_transaction(&self, tx_hash: &str) -> Result<Value> {
        for attempt in 0..self.max_retries {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                let succeeded = receipt.get("status").and_then(Value::as_str) == Some("0x1");
                if !succeeded {
                    return Err(SilentDataError::TransactionFailed {
                        tx_hash: tx_hash.to_string(),
                    });
                }
                return Ok(receipt);
            }
            debug!(attempt, %tx_hash, "transaction pending");
            tokio::time::sleep(self.polling_interval).await;
        }
        Err(SilentDataError::TransactionNotMined)
    }
}

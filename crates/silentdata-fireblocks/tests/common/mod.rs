/*
[INPUT]:  Test configuration and scripted custodial responses
[OUTPUT]: Shared test utilities and a scripted Fireblocks API double
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for silentdata-fireblocks tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use alloy_dyn_abi::TypedData;
use alloy_primitives::{B256, Signature};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use serde_json::Value;

use silentdata_fireblocks::{
    CreateTransactionResponse, FireblocksApi, FireblocksConfig, SignatureParts, SignedMessage,
    TransactionArguments, TransactionInfo, TransactionOperation, TransactionStatus, VaultAddress,
};
use silentdata_provider::{Result, SilentDataError};

/// A well-known test private key
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Fireblocks configuration with fast polling for tests
pub fn test_fireblocks_config() -> FireblocksConfig {
    let mut config = FireblocksConfig::new("test-api-key", "7", "ETH_TEST");
    config.signing_poll_interval = Duration::from_millis(5);
    config.polling_interval = Duration::from_millis(5);
    config
}

/// In-process Fireblocks double: genuinely signs submitted content with
/// a local key, after walking each transaction through a scripted list
/// of intermediate statuses.
pub struct ScriptedApi {
    wallet: PrivateKeySigner,
    statuses: Mutex<VecDeque<TransactionStatus>>,
    submitted: Mutex<Vec<TransactionArguments>>,
    contents: Mutex<HashMap<String, (TransactionOperation, Value)>>,
    next_id: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::with_statuses(vec![])
    }

    /// Statuses served before signing completes; once exhausted, every
    /// poll reports `Completed`
    pub fn with_statuses(statuses: Vec<TransactionStatus>) -> Self {
        let wallet = TEST_KEY.parse().unwrap();
        Self {
            wallet,
            statuses: Mutex::new(statuses.into()),
            submitted: Mutex::new(Vec::new()),
            contents: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn wallet_address(&self) -> alloy_primitives::Address {
        self.wallet.address()
    }

    pub fn submitted(&self) -> Vec<TransactionArguments> {
        self.submitted.lock().unwrap().clone()
    }

    fn sign_content(&self, operation: TransactionOperation, content: &Value) -> SignatureParts {
        let digest = match operation {
            TransactionOperation::Raw => {
                let hex_digest = content.as_str().unwrap();
                B256::from_slice(&hex::decode(hex_digest).unwrap())
            }
            TransactionOperation::TypedMessage => {
                let typed: TypedData = serde_json::from_value(content.clone()).unwrap();
                typed.eip712_signing_hash().unwrap()
            }
        };
        let signature: Signature = self.wallet.sign_hash_sync(&digest).unwrap();
        SignatureParts {
            r: format!("{:064x}", signature.r()),
            s: format!("{:064x}", signature.s()),
            v: signature.v() as u64,
        }
    }
}

#[async_trait]
impl FireblocksApi for ScriptedApi {
    async fn create_transaction(
        &self,
        args: &TransactionArguments,
    ) -> Result<CreateTransactionResponse> {
        let id = format!("tx-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let content = args.extra_parameters.raw_message_data.messages[0].content.clone();
        self.contents
            .lock()
            .unwrap()
            .insert(id.clone(), (args.operation, content));
        self.submitted.lock().unwrap().push(args.clone());
        Ok(CreateTransactionResponse {
            id,
            status: TransactionStatus::Submitted,
        })
    }

    async fn get_transaction(&self, tx_id: &str) -> Result<TransactionInfo> {
        if let Some(status) = self.statuses.lock().unwrap().pop_front() {
            let signed_messages = (status == TransactionStatus::Completed).then(|| {
                let contents = self.contents.lock().unwrap();
                let (operation, content) = &contents[tx_id];
                vec![SignedMessage {
                    signature: self.sign_content(*operation, content),
                }]
            });
            return Ok(TransactionInfo {
                id: tx_id.to_string(),
                status,
                signed_messages,
            });
        }

        let contents = self.contents.lock().unwrap();
        let (operation, content) = contents.get(tx_id).ok_or_else(|| {
            SilentDataError::InvalidResponse(format!("unknown transaction {tx_id}"))
        })?;
        Ok(TransactionInfo {
            id: tx_id.to_string(),
            status: TransactionStatus::Completed,
            signed_messages: Some(vec![SignedMessage {
                signature: self.sign_content(*operation, content),
            }]),
        })
    }

    async fn vault_addresses(
        &self,
        _vault_account_id: &str,
        _asset_id: &str,
    ) -> Result<Vec<VaultAddress>> {
        Ok(vec![VaultAddress {
            address: self.wallet.address().to_checksum(None),
        }])
    }
}

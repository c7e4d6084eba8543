/*
[INPUT]:  Scripted custodial responses and signing requests
[OUTPUT]: Assertions on the submit-then-poll signing protocol
[POS]:    Integration tests - custodial signer behavior
[UPDATE]: When the signing protocol or repacking changes
*/

mod common;

use std::sync::Arc;

use alloy_dyn_abi::TypedData;
use alloy_primitives::Signature;
use alloy_primitives::utils::eip191_hash_message;
use async_trait::async_trait;
use common::{ScriptedApi, test_fireblocks_config};
use serde_json::json;
use silentdata_fireblocks::{
    CreateTransactionResponse, FireblocksApi, FireblocksSigner, TransactionArguments,
    TransactionInfo, TransactionOperation, TransactionStatus, VaultAddress,
};
use silentdata_provider::{RequestSigner, Result, SilentDataError};
use tokio_test::assert_ok;

async fn signer(api: Arc<ScriptedApi>) -> FireblocksSigner {
    FireblocksSigner::connect(api, &test_fireblocks_config())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_connect_resolves_vault_address() {
    let api = Arc::new(ScriptedApi::new());
    let signer = signer(api.clone()).await;
    assert_eq!(signer.address(), api.wallet_address());
}

struct EmptyVaultApi;

#[async_trait]
impl FireblocksApi for EmptyVaultApi {
    async fn create_transaction(
        &self,
        _args: &TransactionArguments,
    ) -> Result<CreateTransactionResponse> {
        Err(SilentDataError::InvalidResponse("unexpected submit".to_string()))
    }

    async fn get_transaction(&self, tx_id: &str) -> Result<TransactionInfo> {
        Err(SilentDataError::InvalidResponse(format!("unexpected poll for {tx_id}")))
    }

    async fn vault_addresses(
        &self,
        _vault_account_id: &str,
        _asset_id: &str,
    ) -> Result<Vec<VaultAddress>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn test_connect_fails_on_empty_vault() {
    let err = FireblocksSigner::connect(Arc::new(EmptyVaultApi), &test_fireblocks_config())
        .await
        .unwrap_err();
    match err {
        SilentDataError::Config(message) => {
            assert!(message.contains("7"));
            assert!(message.contains("ETH_TEST"));
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_message_submits_eip191_digest_as_raw() {
    let api = Arc::new(ScriptedApi::new());
    let signer = signer(api.clone()).await;

    signer.sign_message("hello vault").await.unwrap();

    let submitted = api.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].operation, TransactionOperation::Raw);
    assert_eq!(submitted[0].asset_id, "ETH_TEST");
    assert_eq!(submitted[0].source.id, "7");

    let content = submitted[0].extra_parameters.raw_message_data.messages[0]
        .content
        .as_str()
        .unwrap()
        .to_string();
    let expected = hex::encode(eip191_hash_message("hello vault".as_bytes()));
    assert_eq!(content, expected);
}

#[tokio::test]
async fn test_sign_message_recovers_to_vault_address() {
    let api = Arc::new(ScriptedApi::new());
    let signer = signer(api.clone()).await;

    let signature_hex = assert_ok!(signer.sign_message("hello vault").await);
    let bytes = hex::decode(signature_hex.strip_prefix("0x").unwrap()).unwrap();
    let signature = Signature::from_raw(&bytes).unwrap();
    let recovered = signature
        .recover_address_from_msg("hello vault".as_bytes())
        .unwrap();
    assert_eq!(recovered, api.wallet_address());
}

#[tokio::test]
async fn test_polling_rides_through_intermediate_statuses() {
    let api = Arc::new(ScriptedApi::with_statuses(vec![
        TransactionStatus::Submitted,
        TransactionStatus::Queued,
        TransactionStatus::PendingSignature,
        TransactionStatus::Completed,
    ]));
    let signer = signer(api.clone()).await;

    let signature_hex = assert_ok!(signer.sign_message("patience").await);
    assert!(signature_hex.starts_with("0x"));
    assert_eq!(signature_hex.len(), 132);
}

#[tokio::test]
async fn test_rejected_transaction_names_id_and_status() {
    let api = Arc::new(ScriptedApi::with_statuses(vec![
        TransactionStatus::PendingAuthorization,
        TransactionStatus::Rejected,
    ]));
    let signer = signer(api.clone()).await;

    let err = signer.sign_message("denied").await.unwrap_err();
    match err {
        SilentDataError::RemoteSigning { tx_id, status } => {
            assert_eq!(tx_id, "tx-1");
            assert_eq!(status, "REJECTED");
        }
        other => panic!("expected RemoteSigning, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_transaction_fails() {
    let api = Arc::new(ScriptedApi::with_statuses(vec![TransactionStatus::Cancelled]));
    let signer = signer(api.clone()).await;
    let err = signer.sign_message("dropped").await.unwrap_err();
    assert!(matches!(err, SilentDataError::RemoteSigning { .. }));
    assert!(err.is_signing_error());
}

#[tokio::test]
async fn test_sign_typed_data_submits_typed_message() {
    let api = Arc::new(ScriptedApi::new());
    let signer = signer(api.clone()).await;

    let typed: TypedData = serde_json::from_value(json!({
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
        "domain": { "name": "Silent Data [Rollup]", "version": "1" },
        "message": {
            "expires": "2026-01-01T00:00:00.000Z",
            "ephemeralAddress": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        },
    }))
    .unwrap();

    let signature_hex = assert_ok!(signer.sign_typed_data(&typed).await);

    let submitted = api.submitted();
    assert_eq!(submitted[0].operation, TransactionOperation::TypedMessage);
    let message = &submitted[0].extra_parameters.raw_message_data.messages[0];
    assert_eq!(message.message_type.as_deref(), Some("EIP712"));
    assert_eq!(message.content["primaryType"], "Ticket");

    // repacked signature verifies against the typed-data hash
    let bytes = hex::decode(signature_hex.strip_prefix("0x").unwrap()).unwrap();
    let signature = Signature::from_raw(&bytes).unwrap();
    let hash = typed.eip712_signing_hash().unwrap();
    let recovered = signature.recover_address_from_prehash(&hash).unwrap();
    assert_eq!(recovered, api.wallet_address());
}

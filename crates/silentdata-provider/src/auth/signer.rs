/*
[INPUT]:  Messages and typed data to sign, plus a signing key or backend
[OUTPUT]: Hex signatures and the signer's address
[POS]:    Auth layer - signer backend abstraction
[UPDATE]: When adding new signer backends or changing signature format
*/

use std::str::FromStr;

use alloy_dyn_abi::TypedData;
use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::error::{Result, SilentDataError};

/// Capability interface over signer backends (local wallet, custodial
/// service, browser extension).
///
/// Custodial backends implement these via their own submit-then-poll
/// protocol, keeping the header builder backend-agnostic.
#[async_trait]
pub trait RequestSigner: Send + Sync + std::fmt::Debug {
    /// The signer's Ethereum address
    fn address(&self) -> Address;

    /// Personal-message (EIP-191) signature over `message`, hex encoded
    async fn sign_message(&self, message: &str) -> Result<String>;

    /// EIP-712 signature over `typed_data`, hex encoded
    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String>;
}

/// Signer backed by an in-process private key
#[derive(Debug, Clone)]
pub struct WalletSigner {
    signer: PrivateKeySigner,
}

impl WalletSigner {
    /// Create a signer from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| SilentDataError::Config(format!("Invalid private key: {}", e)))?;
        Ok(Self { signer })
    }

    /// Create a signer with a fresh random keypair
    pub fn random() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }
}

impl From<PrivateKeySigner> for WalletSigner {
    fn from(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }
}

#[async_trait]
impl RequestSigner for WalletSigner {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| SilentDataError::Signing(format!("Failed to sign message: {}", e)))?;

        // alloy's Signature as_bytes() returns [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<String> {
        let signature = self
            .signer
            .sign_dynamic_typed_data(typed_data)
            .await
            .map_err(|e| SilentDataError::Signing(format!("Failed to sign typed data: {}", e)))?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

/// Mock signer returning a predetermined signature, for tests
#[derive(Debug, Clone)]
pub struct MockRequestSigner {
    address: Address,
    signature: String,
}

impl MockRequestSigner {
    pub fn new(address: Address, signature: &str) -> Self {
        Self {
            address,
            signature: signature.to_string(),
        }
    }
}

#[async_trait]
impl RequestSigner for MockRequestSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_message(&self, _message: &str) -> Result<String> {
        Ok(self.signature.clone())
    }

    async fn sign_typed_data(&self, _typed_data: &TypedData) -> Result<String> {
        Ok(self.signature.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A well-known test private key
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_wallet_signer_address_and_signature() {
        let signer = WalletSigner::new(TEST_KEY).unwrap();
        assert_eq!(
            signer.address().to_checksum(None),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );

        let signature = signer.sign_message("hello").await.unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132); // 0x + 65 bytes * 2
    }

    #[test]
    fn test_wallet_signer_no_prefix() {
        let key = TEST_KEY.strip_prefix("0x").unwrap();
        let signer = WalletSigner::new(key).unwrap();
        assert_eq!(
            signer.address().to_checksum(None),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[tokio::test]
    async fn test_signature_recovers_signer_address() {
        let signer = WalletSigner::new(TEST_KEY).unwrap();
        let message = "canonical message + timestamp";
        let signature_hex = signer.sign_message(message).await.unwrap();

        let bytes = hex::decode(signature_hex.strip_prefix("0x").unwrap()).unwrap();
        let signature = alloy_primitives::Signature::from_raw(&bytes).unwrap();
        let recovered = signature.recover_address_from_msg(message.as_bytes()).unwrap();
        assert_eq!(recovered, signer.address());
    }
}

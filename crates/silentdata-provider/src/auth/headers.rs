/*
[INPUT]:  RPC payload, signature scheme, primary and delegate signers
[OUTPUT]: Auth headers for a single outbound request
[POS]:    Auth layer - per-request header orchestration
[UPDATE]: When the header set or signing flow changes
*/

use std::sync::Arc;

use tracing::debug;

use crate::auth::codec;
use crate::auth::delegate::DelegateManager;
use crate::auth::signer::RequestSigner;
use crate::error::{Result, SilentDataError};
use crate::types::{AuthHeaders, RpcPayload, SignatureType};

/// Builds the auth header set for one outbound call.
///
/// The signing key is the delegate signer when delegation is enabled,
/// otherwise the primary signer; the scheme decides which header carries
/// the signature.
pub struct AuthHeaderBuilder {
    signature_type: SignatureType,
    delegate: Arc<DelegateManager>,
}

impl AuthHeaderBuilder {
    pub fn new(signature_type: SignatureType, delegate: Arc<DelegateManager>) -> Self {
        Self {
            signature_type,
            delegate,
        }
    }

    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    /// Compute the auth headers for `payload`, timestamped now
    pub async fn auth_headers(
        &self,
        primary: &Arc<dyn RequestSigner>,
        payload: &RpcPayload,
    ) -> Result<AuthHeaders> {
        let timestamp = codec::iso_timestamp();
        let signer = match self.delegate.delegate_signer().await? {
            Some(delegate) => delegate,
            None => primary.clone(),
        };

        let mut headers = AuthHeaders {
            timestamp: timestamp.clone(),
            signature: None,
            eip712_signature: None,
        };

        match self.signature_type {
            SignatureType::Raw => {
                debug!(method = %payload.method, "generating auth header raw signature");
                let message = codec::raw_message(payload, &timestamp)?;
                headers.signature = Some(signer.sign_message(&message).await?);
            }
            SignatureType::Eip712 => {
                debug!(method = %payload.method, "generating auth header EIP712 signature");
                let typed = codec::auth_typed_data(payload, &timestamp)?;
                headers.eip712_signature = Some(signer.sign_typed_data(&typed).await?);
            }
            other => {
                return Err(SilentDataError::UnsupportedSignatureType(other.to_string()));
            }
        }

        Ok(headers)
    }
}

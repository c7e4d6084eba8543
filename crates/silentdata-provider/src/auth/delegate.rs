/*
[INPUT]:  Delegate configuration and the primary signer
[OUTPUT]: Cached ephemeral signer and signed delegate headers
[POS]:    Auth layer - delegate credential lifecycle
[UPDATE]: When delegate provisioning or the ticket format changes
*/

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::auth::codec;
use crate::auth::signer::{RequestSigner, WalletSigner};
use crate::error::{Result, SilentDataError};
use crate::types::{
    DELEGATE_EXPIRATION_THRESHOLD_BUFFER, DEFAULT_DELEGATE_EXPIRES, DelegateHeaders,
    DelegateOption, DelegateTicket, SignatureType,
};

/// Source of ephemeral delegate signers.
///
/// The default provisioner generates a fresh random keypair; callers may
/// supply their own to fetch a delegate from any source.
#[async_trait]
pub trait DelegateProvisioner: Send + Sync {
    async fn provision(&self) -> Result<Arc<dyn RequestSigner>>;
}

/// Default provisioner: a fresh random in-process keypair
#[derive(Debug, Default)]
pub struct RandomDelegate;

#[async_trait]
impl DelegateProvisioner for RandomDelegate {
    async fn provision(&self) -> Result<Arc<dyn RequestSigner>> {
        Ok(Arc::new(WalletSigner::random()))
    }
}

struct DelegateSettings {
    provisioner: Arc<dyn DelegateProvisioner>,
    expires: u64,
}

#[derive(Default)]
struct DelegateState {
    signer: Option<Arc<dyn RequestSigner>>,
    signer_expires: i64,
    cached_headers: Option<DelegateHeaders>,
    cached_expiry: i64,
}

/// Obtains and caches the ephemeral delegate signer and the signed
/// delegate headers proving the primary signer authorized it.
///
/// Mutation happens only inside the single active signing session
/// (enforced by the request serializer), so reads never race a refresh.
pub struct DelegateManager {
    settings: Option<DelegateSettings>,
    state: RwLock<DelegateState>,
}

impl DelegateManager {
    pub fn new(option: DelegateOption) -> Self {
        let settings = match option {
            DelegateOption::Off => None,
            DelegateOption::Default => Some(DelegateSettings {
                provisioner: Arc::new(RandomDelegate),
                expires: DEFAULT_DELEGATE_EXPIRES,
            }),
            DelegateOption::Custom { provisioner, expires } => {
                Some(DelegateSettings { provisioner, expires })
            }
        };
        Self {
            settings,
            state: RwLock::new(DelegateState::default()),
        }
    }

    /// Whether delegation is configured at all
    pub fn enabled(&self) -> bool {
        self.settings.is_some()
    }

    /// The delegate signer, provisioning a new one if none is cached or
    /// the cached one is within the expiry buffer. Returns `None` when
    /// delegation is disabled.
    pub async fn delegate_signer(&self) -> Result<Option<Arc<dyn RequestSigner>>> {
        let Some(settings) = &self.settings else {
            return Ok(None);
        };

        let now = Utc::now().timestamp();
        {
            let state = self.state.read().unwrap();
            if let Some(signer) = &state.signer {
                if state.signer_expires - DELEGATE_EXPIRATION_THRESHOLD_BUFFER > now {
                    debug!(
                        expires_in = state.signer_expires - now,
                        "returning cached delegate signer"
                    );
                    return Ok(Some(signer.clone()));
                }
            }
        }

        debug!("provisioning new delegate signer");
        let signer = settings
            .provisioner
            .provision()
            .await
            .map_err(|e| SilentDataError::DelegateProvisioning(e.to_string()))?;

        let mut state = self.state.write().unwrap();
        state.signer = Some(signer.clone());
        state.signer_expires = now + settings.expires as i64;
        Ok(Some(signer))
    }

    /// Signed delegate headers, served from cache while
    /// `cached_expiry > now + buffer`.
    ///
    /// The ticket is signed by the PRIMARY signer, not the delegate: the
    /// signature proves the primary key authorized this ephemeral key.
    pub async fn delegate_headers(
        &self,
        primary: &dyn RequestSigner,
        signature_type: SignatureType,
    ) -> Result<DelegateHeaders> {
        let now = Utc::now().timestamp();
        {
            let state = self.state.read().unwrap();
            if let Some(headers) = &state.cached_headers {
                if state.cached_expiry > now + DELEGATE_EXPIRATION_THRESHOLD_BUFFER {
                    debug!("returning cached delegate headers");
                    return Ok(headers.clone());
                }
            }
        }

        let signer = self.delegate_signer().await?.ok_or_else(|| {
            SilentDataError::DelegateProvisioning("delegation is not enabled".to_string())
        })?;

        let signer_expires = self.state.read().unwrap().signer_expires;
        let expires_at = DateTime::<Utc>::from_timestamp(signer_expires, 0).ok_or_else(|| {
            SilentDataError::DelegateProvisioning("invalid delegate expiry".to_string())
        })?;
        let ticket = DelegateTicket {
            expires: expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ephemeral_address: signer.address().to_checksum(None),
        };

        let delegate = serde_json::to_string(&ticket)?;
        let mut headers = DelegateHeaders {
            delegate,
            delegate_signature: None,
            eip712_delegate_signature: None,
        };

        match signature_type {
            SignatureType::Raw => {
                debug!("generating delegate raw signature");
                let message = serde_json::to_string(&ticket)?;
                let signature = primary.sign_message(&message).await.map_err(|e| {
                    SilentDataError::DelegateProvisioning(format!("ticket signing failed: {e}"))
                })?;
                headers.delegate_signature = Some(signature);
            }
            SignatureType::Eip712 => {
                debug!("generating delegate EIP712 signature");
                let typed = codec::delegate_typed_data(&ticket)?;
                let signature = primary.sign_typed_data(&typed).await.map_err(|e| {
                    SilentDataError::DelegateProvisioning(format!("ticket signing failed: {e}"))
                })?;
                headers.eip712_delegate_signature = Some(signature);
            }
            other => {
                return Err(SilentDataError::UnsupportedSignatureType(other.to_string()));
            }
        }

        let mut state = self.state.write().unwrap();
        state.cached_headers = Some(headers.clone());
        state.cached_expiry = signer_expires;
        Ok(headers)
    }

    /// Whether the cached delegate session is still valid; signed calls
    /// may bypass the signing-session queue while this holds.
    pub fn session_valid(&self) -> bool {
        let state = self.state.read().unwrap();
        state.cached_headers.is_some()
            && state.cached_expiry - DELEGATE_EXPIRATION_THRESHOLD_BUFFER > Utc::now().timestamp()
    }

    /// Drop the cached delegate signer and headers; the next signed call
    /// provisions fresh credentials.
    pub fn reset(&self) {
        let mut state = self.state.write().unwrap();
        *state = DelegateState::default();
    }
}

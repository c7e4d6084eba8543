/*
[INPUT]:  Caller-supplied provider settings
[OUTPUT]: Validated configuration for SilentDataProvider construction
[POS]:    Data layer - configuration surface
[UPDATE]: When recognized provider options change
*/

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{DelegateProvisioner, RequestSigner};
use crate::types::{Network, SignatureType};

/// Delegate configuration.
///
/// - `Off`: every signed request is signed by the primary signer.
/// - `Default`: a fresh random ephemeral keypair with the default lifetime.
/// - `Custom`: caller-provided provisioning function and lifetime override.
#[derive(Clone, Default)]
pub enum DelegateOption {
    #[default]
    Off,
    Default,
    Custom {
        provisioner: Arc<dyn DelegateProvisioner>,
        expires: u64,
    },
}

impl std::fmt::Debug for DelegateOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelegateOption::Off => f.write_str("Off"),
            DelegateOption::Default => f.write_str("Default"),
            DelegateOption::Custom { expires, .. } => {
                f.debug_struct("Custom").field("expires", expires).finish()
            }
        }
    }
}

/// Provider configuration.
///
/// `rpc_url` and one of `private_key`/`signer` are mandatory; everything
/// else has defaults. `methods_to_sign` names the contract methods whose
/// `eth_call`s require auth headers (resolved against the ABI supplied via
/// `SilentDataProvider::set_contract`).
#[derive(Clone)]
pub struct ProviderConfig {
    pub rpc_url: String,
    pub network: Network,
    pub chain_id: Option<u64>,
    pub private_key: Option<String>,
    pub signer: Option<Arc<dyn RequestSigner>>,
    pub delegate: DelegateOption,
    pub auth_signature_type: SignatureType,
    pub methods_to_sign: Vec<String>,
    /// Integration-widened allow-list additions (e.g. unconditional
    /// `eth_call` for custodial transports).
    pub extra_sign_methods: Vec<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl ProviderConfig {
    /// Configuration with defaults for the given RPC URL
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network: Network::Mainnet,
            chain_id: None,
            private_key: None,
            signer: None,
            delegate: DelegateOption::Off,
            auth_signature_type: SignatureType::Raw,
            methods_to_sign: Vec::new(),
            extra_sign_methods: Vec::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Effective chain id: explicit override or the network default
    pub fn effective_chain_id(&self) -> u64 {
        self.chain_id.unwrap_or_else(|| self.network.chain_id())
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("rpc_url", &self.rpc_url)
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .field("delegate", &self.delegate)
            .field("auth_signature_type", &self.auth_signature_type)
            .field("methods_to_sign", &self.methods_to_sign)
            .field("extra_sign_methods", &self.extra_sign_methods)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::new("https://rpc.example");
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.auth_signature_type, SignatureType::Raw);
        assert_eq!(config.effective_chain_id(), 51966);
        assert!(matches!(config.delegate, DelegateOption::Off));
    }

    #[test]
    fn test_chain_id_override() {
        let mut config = ProviderConfig::new("https://rpc.example");
        config.network = Network::Testnet;
        assert_eq!(config.effective_chain_id(), 1001);
        config.chain_id = Some(4242);
        assert_eq!(config.effective_chain_id(), 4242);
    }
}

/*
[INPUT]:  Network and signature-scheme identifiers
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for provider configuration
[UPDATE]: When new networks or signature schemes are added
*/

use serde::{Deserialize, Serialize};

/// Signature scheme used for auth headers.
///
/// `Raw` signs the canonical JSON string with a personal-message signature;
/// `Eip712` signs a typed-data structure. `Eip191` is accepted in
/// configuration for parity with the wire contract but the header builder
/// rejects it as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignatureType {
    #[default]
    #[serde(rename = "RAW")]
    Raw,
    #[serde(rename = "EIP191")]
    Eip191,
    #[serde(rename = "EIP712")]
    Eip712,
}

impl std::fmt::Display for SignatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignatureType::Raw => "RAW",
            SignatureType::Eip191 => "EIP191",
            SignatureType::Eip712 => "EIP712",
        };
        f.write_str(name)
    }
}

/// Silent Data rollup networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Network name as announced by the RPC endpoint
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "sdr",
            Network::Testnet => "sdr-testnet",
        }
    }

    /// Default chain id for the network
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 51966,
            Network::Testnet => 1001,
        }
    }
}

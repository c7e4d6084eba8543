/*
[INPUT]:  Protocol-level constants shared by client and server
[OUTPUT]: Header names, signable-method allow-list, EIP-712 domain values
[POS]:    Data layer - versioned wire contract constants
[UPDATE]: When the RPC endpoint's auth contract changes
*/

/// RPC methods that reveal account or transaction state and therefore
/// always require auth headers. This list is part of the wire contract
/// shared by all integrations; it is not user-configurable.
pub const SIGN_RPC_METHODS: [&str; 6] = [
    "eth_getTransactionByHash",
    "eth_getBalance",
    "eth_getTransactionCount",
    "eth_getProof",
    "eth_getTransactionReceipt",
    "eth_getBlockByNumber",
];

pub const HEADER_TIMESTAMP: &str = "x-timestamp";
pub const HEADER_SIGNATURE: &str = "x-signature";
pub const HEADER_EIP712_SIGNATURE: &str = "x-eip712-signature";
pub const HEADER_DELEGATE: &str = "x-delegate";
pub const HEADER_DELEGATE_SIGNATURE: &str = "x-delegate-signature";
pub const HEADER_EIP712_DELEGATE_SIGNATURE: &str = "x-eip712-delegate-signature";

/// EIP-712 domain under which every auth and delegate message is signed.
pub const EIP712_DOMAIN_NAME: &str = "Silent Data [Rollup]";
pub const EIP712_DOMAIN_VERSION: &str = "1";

/// Seconds before expiry at which a cached delegate stops being served.
pub const DELEGATE_EXPIRATION_THRESHOLD_BUFFER: i64 = 5;

/// Default delegate lifetime: one week.
pub const DEFAULT_DELEGATE_EXPIRES: u64 = 7 * 24 * 60 * 60;

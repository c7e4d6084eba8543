/*
[INPUT]:  Fireblocks API credentials and Silent Data RPC endpoint
[OUTPUT]: Custodially signed RPC calls and a broadcast transaction
[POS]:    Examples - Fireblocks provider usage
[UPDATE]: When the custodial provider surface changes
*/

use alloy_primitives::{Address, Bytes, U256};
use silentdata_fireblocks::*;
use silentdata_provider::{Network, ProviderConfig, RequestSigner};

/// Example: Fireblocks-backed provider
///
/// Request signatures come from a Fireblocks vault account instead of a
/// local private key. Each signature walks the vault's approval flow,
/// so calls block until an approver (or automation rule) signs off.
#[tokio::main]
async fn main() {
    println!("=== Silent Data Fireblocks Example ===\n");

    let rpc_url = std::env::var("SILENTDATA_RPC_URL")
        .unwrap_or_else(|_| "https://testnet.silentdata.com".to_string());
    let (api_key, vault_id) = match (
        std::env::var("FIREBLOCKS_API_KEY"),
        std::env::var("FIREBLOCKS_VAULT_ACCOUNT_ID"),
    ) {
        (Ok(key), Ok(vault)) => (key, vault),
        _ => {
            eprintln!("Set FIREBLOCKS_API_KEY and FIREBLOCKS_VAULT_ACCOUNT_ID to run this example");
            return;
        }
    };

    let mut provider_config = ProviderConfig::new(rpc_url);
    provider_config.network = Network::Testnet;
    let fireblocks_config = FireblocksConfig::new(api_key, vault_id, "ETH_TEST");

    let provider = match SilentDataFireblocksProvider::connect(provider_config, fireblocks_config)
        .await
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to connect: {}", e);
            return;
        }
    };
    println!("✓ Connected, vault address: {}", provider.signer().address());

    // Reads of private state go through the vault for signing; with a
    // custodial signer every eth_call is signed as well
    let address = provider.signer().address().to_string();
    match provider.provider().get_balance(&address, "latest").await {
        Ok(balance) => println!("✓ Vault balance: {}", balance),
        Err(e) => eprintln!("get_balance failed: {}", e),
    }

    // Full custodial transaction pipeline: build, vault-sign the hash,
    // broadcast, wait for the receipt
    let recipient: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        .parse()
        .expect("static address");
    match provider
        .send_transaction(recipient, U256::from(1_000_000_000_000_000u64), Bytes::new())
        .await
    {
        Ok(receipt) => println!("✓ Transaction mined in block {}", receipt["blockNumber"]),
        Err(e) => eprintln!("send_transaction failed: {}", e),
    }

    println!("\n✓ Fireblocks example complete");
}

/*
[INPUT]:  Wallet private key and Silent Data RPC endpoint
[OUTPUT]: Signed and unsigned JSON-RPC calls against the rollup
[POS]:    Examples - basic provider usage
[UPDATE]: When the provider surface changes
*/

use silentdata_provider::*;

/// Example: Basic provider usage
///
/// This example demonstrates the core flow:
/// 1. Configure the provider with an RPC URL and a private key
/// 2. Make an unsigned call (public data, no headers)
/// 3. Make a signed call (private state, auth headers attached)
#[tokio::main]
async fn main() {
    println!("=== Silent Data Provider Example ===\n");

    let rpc_url = std::env::var("SILENTDATA_RPC_URL")
        .unwrap_or_else(|_| "https://testnet.silentdata.com".to_string());
    let private_key = match std::env::var("SILENTDATA_PRIVATE_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Set SILENTDATA_PRIVATE_KEY to run this example");
            return;
        }
    };

    // Step 1: Configure and create the provider
    let mut config = ProviderConfig::new(rpc_url);
    config.network = Network::Testnet;
    config.private_key = Some(private_key);
    let provider = match SilentDataProvider::new(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to create provider: {}", e);
            return;
        }
    };
    println!("✓ Provider created for {}", provider.network().name());
    println!("  Signer address: {}", provider.signer().address());

    // Step 2: Unsigned call - block numbers are public
    match provider.block_number().await {
        Ok(block) => println!("✓ Current block: {}", block),
        Err(e) => eprintln!("block_number failed: {}", e),
    }

    // Step 3: Signed call - balances are private state on Silent Data,
    // so the provider attaches x-timestamp and x-signature headers
    let address = provider.signer().address().to_string();
    match provider.get_balance(&address, "latest").await {
        Ok(balance) => println!("✓ Balance of {}: {}", address, balance),
        Err(e) => eprintln!("get_balance failed: {}", e),
    }

    println!("\n✓ Provider example complete");
}

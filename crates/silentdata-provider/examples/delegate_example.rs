/*
[INPUT]:  Wallet private key and Silent Data RPC endpoint
[OUTPUT]: Signed calls authenticated through an ephemeral delegate key
[POS]:    Examples - delegate session demonstration
[UPDATE]: When delegate configuration changes
*/

use std::sync::Arc;

use silentdata_provider::*;

/// Example: Delegate sessions
///
/// With delegation enabled, the primary key signs a ticket once,
/// authorizing an ephemeral key for a limited window. All subsequent
/// request signatures come from the ephemeral key, so the primary key
/// can stay cold (or behind a slow custodial signer) after setup.
#[tokio::main]
async fn main() {
    println!("=== Silent Data Delegate Example ===\n");

    let rpc_url = std::env::var("SILENTDATA_RPC_URL")
        .unwrap_or_else(|_| "https://testnet.silentdata.com".to_string());
    let private_key = match std::env::var("SILENTDATA_PRIVATE_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Set SILENTDATA_PRIVATE_KEY to run this example");
            return;
        }
    };

    let mut config = ProviderConfig::new(rpc_url);
    config.network = Network::Testnet;
    config.private_key = Some(private_key);
    // One week of delegated signing from a fresh random key
    config.delegate = DelegateOption::Default;

    let provider = match SilentDataProvider::new(config) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            eprintln!("Failed to create provider: {}", e);
            return;
        }
    };
    println!("✓ Provider created with delegation enabled");

    // The Sender serializes signed calls while the delegate session is
    // being established; once it is, signed calls run concurrently
    let sender = Sender::new(provider.clone());
    let address = provider.signer().address().to_string();

    // First signed call provisions the delegate and signs the ticket
    match sender.send("eth_getBalance", serde_json::json!([address, "latest"])).await {
        Ok(balance) => println!("✓ Balance (delegate session established): {}", balance),
        Err(e) => eprintln!("get_balance failed: {}", e),
    }
    println!("  Session valid: {}", provider.session_valid());

    // Subsequent signed calls reuse the cached delegate headers
    match sender.send("eth_getTransactionCount", serde_json::json!([address, "latest"])).await {
        Ok(count) => println!("✓ Transaction count (cached session): {}", count),
        Err(e) => eprintln!("get_transaction_count failed: {}", e),
    }

    // Dropping the session forces fresh credentials on the next call
    provider.reset_session();
    println!("✓ Session reset; next signed call re-provisions the delegate");

    println!("\n✓ Delegate example complete");
}

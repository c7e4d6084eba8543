/*
[INPUT]:  Sender address and the current network nonce
[OUTPUT]: Next safe transaction nonce
[POS]:    RPC layer - local nonce management
[UPDATE]: When nonce assignment rules change
*/

use std::collections::HashMap;
use std::sync::Mutex;

/// Per-address local nonce high-water mark.
///
/// Multiple transactions can be initiated before earlier ones confirm, so
/// the network nonce alone is not enough. The returned nonce is always
/// `max(last_issued + 1, network_nonce)`, and the read-then-update happens
/// under one lock with no I/O in between, so two concurrent transactions
/// can never receive the same nonce.
#[derive(Debug, Default)]
pub struct NonceTracker {
    last_issued: Mutex<HashMap<String, u64>>,
}

impl NonceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next nonce for `address`, given the nonce the network
    /// currently reports
    pub fn next(&self, address: &str, network_nonce: u64) -> u64 {
        let mut last_issued = self.last_issued.lock().unwrap();
        let nonce = match last_issued.get(address) {
            Some(last) => (last + 1).max(network_nonce),
            None => network_nonce,
        };
        last_issued.insert(address.to_string(), nonce);
        nonce
    }

    /// Forget all issued nonces
    pub fn reset(&self) {
        self.last_issued.lock().unwrap().clear();
    }
}

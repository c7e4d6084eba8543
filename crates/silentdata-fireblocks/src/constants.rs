/*
[INPUT]:  None (static values)
[OUTPUT]: Fireblocks integration constants
[POS]:    Types layer - polling and signing policy defaults
[UPDATE]: When Fireblocks API defaults change
*/

use std::time::Duration;

/// Default Fireblocks REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.fireblocks.io";

/// Receipt polling attempts before giving up on a broadcast transaction
pub const DEFAULT_MAX_RETRIES: u32 = 25;

/// Delay between receipt polling attempts
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(2000);

/// Delay between custodial signing status polls
pub const SIGNING_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Methods signed unconditionally when the signer is custodial, on top
/// of the standard private-state list. Custodial setups route reads
/// through their vault identity, so every `eth_call` carries auth.
pub const FIREBLOCKS_EXTRA_SIGN_METHODS: [&str; 1] = ["eth_call"];

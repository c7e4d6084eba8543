/*
[INPUT]:  RPC calls from callers and integrations
[OUTPUT]: Authenticated JSON-RPC communication with the endpoint
[POS]:    RPC layer - transport, serialization and provider facade
[UPDATE]: When the send pipeline or provider surface changes
*/

pub mod eth;
pub mod nonce;
pub mod provider;
pub mod sender;
pub mod transport;

pub use nonce::NonceTracker;
pub use provider::SilentDataProvider;
pub use sender::Sender;
pub use transport::HttpTransport;

/*
[INPUT]:  Signer backends, policy configuration and RPC payloads
[OUTPUT]: Signed auth and delegate headers
[POS]:    Auth layer - authenticated-request pipeline
[UPDATE]: When the auth flow or signature schemes change
*/

pub mod codec;
pub mod delegate;
pub mod headers;
pub mod policy;
pub mod signer;

pub use delegate::{DelegateManager, DelegateProvisioner, RandomDelegate};
pub use headers::AuthHeaderBuilder;
pub use policy::SignaturePolicy;
pub use signer::{MockRequestSigner, RequestSigner, WalletSigner};

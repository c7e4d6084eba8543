/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Silent Data provider crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod error;
pub mod rpc;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthHeaderBuilder,
    DelegateManager,
    DelegateProvisioner,
    MockRequestSigner,
    RandomDelegate,
    RequestSigner,
    SignaturePolicy,
    WalletSigner,
};

// Re-export commonly used types from rpc
pub use rpc::{
    HttpTransport,
    NonceTracker,
    Sender,
    SilentDataProvider,
};

// Re-export error types
pub use error::{Result, SilentDataError};

// Re-export all types
pub use types::*;

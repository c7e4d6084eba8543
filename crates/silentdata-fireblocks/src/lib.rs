/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Fireblocks integration crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod constants;
pub mod provider;
pub mod signer;
pub mod types;

pub use api::{FireblocksApi, HttpFireblocksApi};
pub use provider::SilentDataFireblocksProvider;
pub use signer::FireblocksSigner;
pub use types::*;

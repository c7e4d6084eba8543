/*
[INPUT]:  Wire contract and configuration type definitions
[OUTPUT]: Public data types shared across the crate
[POS]:    Data layer - module wiring
[UPDATE]: When public types or constants change
*/

pub mod config;
pub mod constants;
pub mod enums;
pub mod models;

pub use config::{DelegateOption, ProviderConfig};
pub use constants::*;
pub use enums::{Network, SignatureType};
pub use models::{AuthHeaders, DelegateHeaders, DelegateTicket, RpcErrorObject, RpcPayload};

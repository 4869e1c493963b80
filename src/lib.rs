#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod allocation;
pub mod app;
pub mod primitives;
pub mod psbt_builder;
pub mod signer;
pub mod tracing;
pub mod utxo;

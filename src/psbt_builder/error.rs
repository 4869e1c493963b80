use thiserror::Error;

use crate::{allocation::error::AllocationError, primitives::BitcoinNetwork, utxo::error::UtxoSourceError};

#[derive(Debug, Error)]
pub enum PsbtBuildError {
    #[error("PsbtBuildError - UtxoSource: {0}")]
    UtxoSource(#[from] UtxoSourceError),
    #[error("PsbtBuildError - Allocation: {0}")]
    Allocation(#[from] AllocationError),
    #[error("PsbtBuildError - InvalidRecipient: {0}")]
    InvalidRecipient(bitcoin::address::Error),
    #[error("PsbtBuildError - NetworkMismatch: address {address} is not valid on {network}")]
    NetworkMismatch {
        address: String,
        network: BitcoinNetwork,
    },
    #[error("PsbtBuildError - InvalidPublicKey: {0}")]
    InvalidPublicKey(#[from] bitcoin::key::Error),
    #[error("PsbtBuildError - InvalidKeyHex: {0}")]
    InvalidKeyHex(#[from] hex::FromHexError),
    #[error("PsbtBuildError - InvalidInternalKey: {0}")]
    InvalidInternalKey(#[from] bitcoin::secp256k1::Error),
    #[error("PsbtBuildError - UnexpectedKeyLength: got {0} bytes, expected 32 or 33")]
    UnexpectedKeyLength(usize),
    #[error("PsbtBuildError - UncompressedPublicKey: nested segwit requires a compressed key")]
    UncompressedPublicKey,
    #[error("PsbtBuildError - Serialization: {0}")]
    Serialization(#[from] bitcoin::psbt::Error),
}

use thiserror::Error;

use crate::{
    psbt_builder::error::PsbtBuildError, signer::error::SigningClientError,
    utxo::error::UtxoSourceError,
};

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("ApplicationError - UtxoSource: {0}")]
    UtxoSource(#[from] UtxoSourceError),
    #[error("ApplicationError - PsbtBuild: {0}")]
    PsbtBuild(#[from] PsbtBuildError),
    #[error("ApplicationError - SigningClient: {0}")]
    SigningClient(#[from] SigningClientError),
}

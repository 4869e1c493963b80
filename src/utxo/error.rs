use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtxoSourceError {
    #[error("UtxoSourceError - Transport: {0}")]
    Transport(reqwest::Error),
    #[error("UtxoSourceError - CouldNotDecodeResponseBody: {0}")]
    CouldNotDecodeResponseBody(reqwest::Error),
    #[error("UtxoSourceError - NoSpendableOutput: address has no unspent outputs")]
    NoSpendableOutput,
}
